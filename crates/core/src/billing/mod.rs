//! Shipment pricing: locations, rate and price tables, and the engine composing them.

/// Locations, region classification and the location directory.
pub mod location;
/// Pricing engine.
pub mod service;
/// Weight classes and the rate/price tables.
pub mod tables;

pub use location::{InMemoryLocationStore, Location, LocationDirectory, Region};
pub use service::{BillingService, PricingEngine};
pub use tables::{
    InMemoryPriceStore, InMemoryRateStore, PriceTable, RateTable, WeightClass, MAX_WEIGHT,
};
