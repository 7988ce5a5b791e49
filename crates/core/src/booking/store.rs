use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use super::models::Booking;
use crate::error::{Result, ShippingError};

/// Storage of bookings keyed by id, holding at most one record per id.
pub trait BookingLedger: Send + Sync {
    /// Copy of the booking stored under `id`, or `NotFound`.
    fn get(&self, id: &str) -> Result<Booking>;

    /// Store `booking`, failing with `Conflict` if its id is taken.
    fn add(&self, booking: Booking) -> Result<()>;
}

/// Thread-safe in-memory ledger guarded by a single reader/writer lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    bookings: Arc<RwLock<HashMap<String, Booking>>>,
}

impl InMemoryBookingStore {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings.
    pub fn len(&self) -> usize {
        self.bookings.read().len()
    }

    /// Whether no booking has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.bookings.read().is_empty()
    }
}

impl BookingLedger for InMemoryBookingStore {
    fn get(&self, id: &str) -> Result<Booking> {
        self.bookings
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ShippingError::not_found(format!("booking {id} not found")))
    }

    fn add(&self, booking: Booking) -> Result<()> {
        // Check and insert under one write guard.
        let mut bookings = self.bookings.write();
        if bookings.contains_key(booking.id()) {
            return Err(ShippingError::conflict("booking already exists"));
        }
        bookings.insert(booking.id().to_string(), booking);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Barrier, thread};

    use super::*;
    use crate::error::ErrorKind;

    fn booking(id: &str, price: f64) -> Booking {
        Booking::new(id, "SE", "DK", 15.0, price).expect("valid booking")
    }

    #[test]
    fn add_then_get() {
        let store = InMemoryBookingStore::new();
        store.add(booking("one", 450.0)).unwrap();

        assert_eq!(store.get("one").unwrap(), booking("one", 450.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_booking_is_not_found() {
        let store = InMemoryBookingStore::new();
        let err = store.get("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "booking nope not found");
    }

    #[test]
    fn duplicate_id_conflicts_and_keeps_original() {
        let store = InMemoryBookingStore::new();
        store.add(booking("dup", 450.0)).unwrap();

        let err = store.add(booking("dup", 1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.get("dup").unwrap().price(), 450.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn repeated_reads_do_not_mutate() {
        let store = InMemoryBookingStore::new();
        store.add(booking("stable", 100.0)).unwrap();

        let first = store.get("stable").unwrap();
        for _ in 0..5 {
            assert_eq!(store.get("stable").unwrap(), first);
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_adds_of_same_id_admit_exactly_one() {
        const WRITERS: usize = 16;
        let store = InMemoryBookingStore::new();
        let barrier = Barrier::new(WRITERS);

        let results: Vec<Result<()>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..WRITERS)
                .map(|i| {
                    let store = &store;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        store.add(booking("contended", i as f64))
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("writer panicked"))
                .collect()
        });

        let successes = results.iter().filter(|result| result.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|result| matches!(result, Err(err) if err.kind() == ErrorKind::Conflict))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(conflicts, WRITERS - 1);
        assert_eq!(store.len(), 1);
    }
}
