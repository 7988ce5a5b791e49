use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::{models::Booking, store::BookingLedger};
use crate::{
    billing::PricingEngine,
    error::{Result, ShippingError},
};

const COMPONENT: &str = "booking";

/// Source of fresh booking identifiers.
pub trait IdGenerator: Send + Sync {
    /// Next identifier; collisions are not checked here.
    fn next_id(&self) -> String;
}

/// Random 128-bit identifiers rendered as hyphenated UUID v4 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Prices shipments and records them in the ledger.
#[derive(Clone)]
pub struct BookingService {
    ledger: Arc<dyn BookingLedger>,
    pricing: Arc<dyn PricingEngine>,
    ids: Arc<dyn IdGenerator>,
}

impl BookingService {
    /// Service issuing UUID v4 identifiers.
    pub fn new(ledger: Arc<dyn BookingLedger>, pricing: Arc<dyn PricingEngine>) -> Self {
        Self {
            ledger,
            pricing,
            ids: Arc::new(UuidGenerator),
        }
    }

    /// Replace the identifier source.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Quote without booking.
    pub fn calculate_shipping_cost(&self, origin: &str, destination: &str, weight: f64) -> Result<f64> {
        self.pricing.calculate_shipping_cost(origin, destination, weight)
    }

    /// Price a shipment and store it, returning the new booking id.
    ///
    /// The id is drawn only after pricing succeeds, so a rejected quote leaves
    /// the ledger and the generator untouched.
    pub fn book_shipping(&self, origin: &str, destination: &str, weight: f64) -> Result<String> {
        info!(component = COMPONENT, origin, destination, weight, "booking shipment");

        if origin.is_empty() {
            return Err(ShippingError::invalid_input("empty origin"));
        }
        if destination.is_empty() {
            return Err(ShippingError::invalid_input("empty destination"));
        }

        let price = self
            .pricing
            .calculate_shipping_cost(origin, destination, weight)?;

        let id = self.ids.next_id();
        let booking = Booking::new(id.clone(), origin, destination, weight, price)?;
        self.ledger.add(booking)?;

        debug!(component = COMPONENT, id = %id, price, "booking stored");
        Ok(id)
    }

    /// Fetch a stored booking.
    pub fn get_booking(&self, id: &str) -> Result<Booking> {
        debug!(component = COMPONENT, id, "fetching booking");
        self.ledger.get(id)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Barrier,
        },
        thread,
    };

    use super::*;
    use crate::{
        billing::{
            BillingService, InMemoryLocationStore, InMemoryPriceStore, InMemoryRateStore,
            Location, Region, WeightClass,
        },
        booking::InMemoryBookingStore,
        error::ErrorKind,
    };

    struct FixedPrice(f64);

    impl PricingEngine for FixedPrice {
        fn calculate_shipping_cost(&self, _: &str, _: &str, _: f64) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct FailingPricing(ErrorKind);

    impl PricingEngine for FailingPricing {
        fn calculate_shipping_cost(&self, _: &str, _: &str, _: f64) -> Result<f64> {
            Err(ShippingError::new(self.0, "pricing failed"))
        }
    }

    struct FixedId(&'static str);

    impl IdGenerator for FixedId {
        fn next_id(&self) -> String {
            self.0.to_string()
        }
    }

    #[derive(Default)]
    struct CountingIds(AtomicUsize);

    impl IdGenerator for CountingIds {
        fn next_id(&self) -> String {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            format!("booking-{n}")
        }
    }

    fn billing() -> Arc<BillingService> {
        let rates = InMemoryRateStore::new(HashMap::from([
            (Region::Domestic, 1.0),
            (Region::Eu, 1.5),
            (Region::International, 2.5),
        ]));
        let prices = InMemoryPriceStore::new(HashMap::from([
            (WeightClass::Small, 100.0),
            (WeightClass::Medium, 300.0),
            (WeightClass::Large, 500.0),
            (WeightClass::Huge, 2000.0),
        ]));
        let locations = InMemoryLocationStore::new();
        for (code, eu_member) in [("SE", true), ("DK", true), ("DE", true), ("US", false), ("UG", false)] {
            locations.add(Location::new(code, eu_member).unwrap());
        }
        Arc::new(BillingService::new(
            Arc::new(rates),
            Arc::new(prices),
            Arc::new(locations),
        ))
    }

    #[test]
    fn books_and_fetches_priced_shipments() {
        let service = BookingService::new(Arc::new(InMemoryBookingStore::new()), billing());
        let cases = [
            ("SE", "SE", 5.0, 100.0),
            ("SE", "DK", 15.0, 450.0),
            ("SE", "US", 30.0, 1250.0),
            ("SE", "DK", 400.0, 3000.0),
        ];

        for (origin, destination, weight, price) in cases {
            let id = service.book_shipping(origin, destination, weight).unwrap();
            let booking = service.get_booking(&id).unwrap();
            assert_eq!(booking.id(), id);
            assert_eq!(booking.origin(), origin);
            assert_eq!(booking.destination(), destination);
            assert_eq!(booking.weight(), weight);
            assert_eq!(booking.price(), price);
        }
    }

    #[test]
    fn generated_ids_are_uuids() {
        let service = BookingService::new(Arc::new(InMemoryBookingStore::new()), billing());
        let first = service.book_shipping("SE", "DK", 1.0).unwrap();
        let second = service.book_shipping("SE", "DK", 1.0).unwrap();

        assert_ne!(first, second);
        let parsed = Uuid::parse_str(&first).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(parsed.to_string(), first);
    }

    #[test]
    fn empty_endpoints_are_rejected_before_pricing() {
        let ids = Arc::new(CountingIds::default());
        let service = BookingService::new(
            Arc::new(InMemoryBookingStore::new()),
            Arc::new(FixedPrice(10.0)),
        )
        .with_id_generator(ids.clone());

        let err = service.book_shipping("", "DK", 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message(), "empty origin");

        let err = service.book_shipping("SE", "", 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message(), "empty destination");

        assert_eq!(ids.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn pricing_errors_propagate_without_side_effects() {
        for kind in [ErrorKind::NotFound, ErrorKind::InvalidInput, ErrorKind::Internal] {
            let ledger = Arc::new(InMemoryBookingStore::new());
            let ids = Arc::new(CountingIds::default());
            let service = BookingService::new(ledger.clone(), Arc::new(FailingPricing(kind)))
                .with_id_generator(ids.clone());

            let err = service.book_shipping("SE", "DK", 1.0).unwrap_err();
            assert_eq!(err, ShippingError::new(kind, "pricing failed"));
            assert_eq!(ids.0.load(Ordering::SeqCst), 0);
            assert!(ledger.is_empty());
        }
    }

    #[test]
    fn unknown_location_propagates_not_found() {
        let service = BookingService::new(Arc::new(InMemoryBookingStore::new()), billing());
        let err = service.book_shipping("SE", "ZZ", 10.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = service.calculate_shipping_cost("", "DK", 10.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn zero_weight_prices_but_cannot_be_booked() {
        let ledger = Arc::new(InMemoryBookingStore::new());
        let service = BookingService::new(ledger.clone(), billing());

        assert_eq!(service.calculate_shipping_cost("SE", "DK", 0.0).unwrap(), 150.0);

        let err = service.book_shipping("SE", "DK", 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message(), "invalid weight");
        assert!(ledger.is_empty());
    }

    #[test]
    fn unknown_booking_is_not_found() {
        let service = BookingService::new(Arc::new(InMemoryBookingStore::new()), billing());
        let err = service.get_booking("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn forced_id_collision_yields_one_conflict() {
        let ledger = Arc::new(InMemoryBookingStore::new());
        let service = BookingService::new(ledger.clone(), Arc::new(FixedPrice(100.0)))
            .with_id_generator(Arc::new(FixedId("same-id")));
        let barrier = Barrier::new(2);

        let results: Vec<Result<String>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let service = &service;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        service.book_shipping("SE", "DK", 5.0)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("booking thread panicked"))
                .collect()
        });

        let ok: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(err) if err.kind() == ErrorKind::Conflict))
            .count();
        assert_eq!(ok, vec!["same-id"]);
        assert_eq!(conflicts, 1);
        assert_eq!(ledger.len(), 1);
    }
}
