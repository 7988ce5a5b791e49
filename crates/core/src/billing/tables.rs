use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::location::Region;
use crate::error::{Result, ShippingError};

/// Bucket of a shipment weight that drives the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightClass {
    /// `[0, 10)`
    Small,
    /// `[10, 25)`
    Medium,
    /// `[25, 50)`
    Large,
    /// `[50, 1000)`
    Huge,
}

/// Exclusive upper bound on shippable weight.
pub const MAX_WEIGHT: f64 = 1000.0;

impl WeightClass {
    /// Every weight class, lightest first.
    pub const ALL: [WeightClass; 4] = [
        WeightClass::Small,
        WeightClass::Medium,
        WeightClass::Large,
        WeightClass::Huge,
    ];

    /// Lowercase label used in price tables and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            WeightClass::Small => "small",
            WeightClass::Medium => "medium",
            WeightClass::Large => "large",
            WeightClass::Huge => "huge",
        }
    }

    /// Bucket a weight using half-open thresholds.
    ///
    /// Negative weights, NaN and anything at or above [`MAX_WEIGHT`] are rejected.
    /// Zero is accepted as [`WeightClass::Small`].
    pub fn for_weight(weight: f64) -> Result<Self> {
        if weight.is_nan() || weight < 0.0 {
            return Err(invalid_weight());
        }
        let class = if weight < 10.0 {
            WeightClass::Small
        } else if weight < 25.0 {
            WeightClass::Medium
        } else if weight < 50.0 {
            WeightClass::Large
        } else if weight < MAX_WEIGHT {
            WeightClass::Huge
        } else {
            return Err(invalid_weight());
        };
        Ok(class)
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightClass {
    type Err = ShippingError;

    fn from_str(label: &str) -> Result<Self> {
        WeightClass::ALL
            .into_iter()
            .find(|class| class.as_str() == label)
            .ok_or_else(|| ShippingError::invalid_input(format!("unknown weight class {label}")))
    }
}

fn invalid_weight() -> ShippingError {
    ShippingError::invalid_input("invalid weight")
}

/// Multiplier per region.
pub trait RateTable: Send + Sync {
    /// Rate for `region`; a missing entry is an `Internal` error.
    fn rate_for(&self, region: Region) -> Result<f64>;
}

/// Base price per weight class.
pub trait PriceTable: Send + Sync {
    /// Price for `class`; a missing entry is an `Internal` error.
    fn price_for(&self, class: WeightClass) -> Result<f64>;
}

/// Immutable rate table seeded at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateStore {
    rates: HashMap<Region, f64>,
}

impl InMemoryRateStore {
    /// Wrap a seeded rate map.
    pub fn new(rates: HashMap<Region, f64>) -> Self {
        Self { rates }
    }

    /// Regions that have no rate configured.
    pub fn missing(&self) -> Vec<Region> {
        Region::ALL
            .into_iter()
            .filter(|region| !self.rates.contains_key(region))
            .collect()
    }
}

impl RateTable for InMemoryRateStore {
    fn rate_for(&self, region: Region) -> Result<f64> {
        self.rates
            .get(&region)
            .copied()
            .ok_or_else(|| ShippingError::internal(format!("no rate found for region {region}")))
    }
}

/// Immutable price table seeded at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceStore {
    prices: HashMap<WeightClass, f64>,
}

impl InMemoryPriceStore {
    /// Wrap a seeded price map.
    pub fn new(prices: HashMap<WeightClass, f64>) -> Self {
        Self { prices }
    }

    /// Weight classes that have no price configured.
    pub fn missing(&self) -> Vec<WeightClass> {
        WeightClass::ALL
            .into_iter()
            .filter(|class| !self.prices.contains_key(class))
            .collect()
    }
}

impl PriceTable for InMemoryPriceStore {
    fn price_for(&self, class: WeightClass) -> Result<f64> {
        self.prices
            .get(&class)
            .copied()
            .ok_or_else(|| ShippingError::internal(format!("no price found for class {class}")))
    }
}
