//! Startup seeding: builds the stores and services from configured tables.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    billing::{
        BillingService, InMemoryLocationStore, InMemoryPriceStore, InMemoryRateStore, Location,
        Region, WeightClass,
    },
    booking::{BookingService, InMemoryBookingStore},
    error::{Result, ShippingError},
};

/// One location entry in the seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSeed {
    /// Location code.
    pub code: String,
    /// EU membership flag.
    #[serde(default)]
    pub eu_member: bool,
}

/// Initial contents of the location directory and the rate/price tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    /// Known locations.
    pub locations: Vec<LocationSeed>,
    /// Multiplier per region label (`domestic`, `eu`, `international`).
    pub rates: BTreeMap<String, f64>,
    /// Base price per weight class label (`small`, `medium`, `large`, `huge`).
    pub prices: BTreeMap<String, f64>,
}

impl Default for SeedData {
    fn default() -> Self {
        let locations = [("SE", true), ("DK", true), ("DE", true), ("US", false), ("UG", false)]
            .into_iter()
            .map(|(code, eu_member)| LocationSeed {
                code: code.to_string(),
                eu_member,
            })
            .collect();
        let rates = [("domestic", 1.0), ("eu", 1.5), ("international", 2.5)]
            .into_iter()
            .map(|(label, rate)| (label.to_string(), rate))
            .collect();
        let prices = [("small", 100.0), ("medium", 300.0), ("large", 500.0), ("huge", 2000.0)]
            .into_iter()
            .map(|(label, price)| (label.to_string(), price))
            .collect();
        Self {
            locations,
            rates,
            prices,
        }
    }
}

impl SeedData {
    /// Populate a fresh location directory.
    pub fn location_store(&self) -> Result<InMemoryLocationStore> {
        let store = InMemoryLocationStore::new();
        for seed in &self.locations {
            store.add(Location::new(seed.code.clone(), seed.eu_member)?);
        }
        Ok(store)
    }

    /// Parse the rate labels into a rate table.
    ///
    /// A negative or non-finite rate is a configuration defect and fails with `Internal`.
    pub fn rate_store(&self) -> Result<InMemoryRateStore> {
        let rates = self
            .rates
            .iter()
            .map(|(label, rate)| -> Result<(Region, f64)> {
                Ok((label.parse()?, checked_factor("rate", label, *rate)?))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(InMemoryRateStore::new(rates))
    }

    /// Parse the weight class labels into a price table.
    ///
    /// A negative or non-finite price fails with `Internal`.
    pub fn price_store(&self) -> Result<InMemoryPriceStore> {
        let prices = self
            .prices
            .iter()
            .map(|(label, price)| -> Result<(WeightClass, f64)> {
                Ok((label.parse()?, checked_factor("price", label, *price)?))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(InMemoryPriceStore::new(prices))
    }
}

fn checked_factor(what: &str, label: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ShippingError::internal(format!("invalid {what} {value} for {label}")))
    }
}

/// Fully wired core: seeded stores plus the billing and booking services.
#[derive(Clone)]
pub struct ShippingCore {
    /// Shared location directory.
    pub locations: InMemoryLocationStore,
    /// Shared booking ledger.
    pub ledger: InMemoryBookingStore,
    /// Pricing engine over the seeded tables.
    pub billing: Arc<BillingService>,
    /// Booking orchestrator.
    pub booking: BookingService,
}

impl ShippingCore {
    /// Build every store and service from seed data.
    ///
    /// Incomplete rate or price tables are accepted with a warning; the gap
    /// surfaces as an `Internal` error when a quote needs the missing entry.
    pub fn from_seed(seed: &SeedData) -> Result<Self> {
        let locations = seed.location_store()?;
        let rates = seed.rate_store()?;
        let prices = seed.price_store()?;

        for region in rates.missing() {
            warn!("no rate configured for region {region}");
        }
        for class in prices.missing() {
            warn!("no price configured for weight class {class}");
        }
        info!(
            "seeded {} locations ({}), {} rates, {} prices",
            locations.len(),
            locations.codes().join(", "),
            seed.rates.len(),
            seed.prices.len()
        );

        let billing = Arc::new(BillingService::new(
            Arc::new(rates),
            Arc::new(prices),
            Arc::new(locations.clone()),
        ));
        let ledger = InMemoryBookingStore::new();
        let booking = BookingService::new(Arc::new(ledger.clone()), billing.clone());

        Ok(Self {
            locations,
            ledger,
            billing,
            booking,
        })
    }
}
