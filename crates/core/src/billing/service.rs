use std::sync::Arc;

use tracing::debug;

use super::{
    location::{LocationDirectory, Region},
    tables::{PriceTable, RateTable, WeightClass},
};
use crate::error::{Result, ShippingError};

const COMPONENT: &str = "billing";

/// Anything able to quote a shipment.
pub trait PricingEngine: Send + Sync {
    /// Price of shipping `weight` from `origin` to `destination`.
    fn calculate_shipping_cost(&self, origin: &str, destination: &str, weight: f64) -> Result<f64>;
}

/// Prices shipments from the location directory and the rate/price tables.
#[derive(Clone)]
pub struct BillingService {
    rates: Arc<dyn RateTable>,
    prices: Arc<dyn PriceTable>,
    locations: Arc<dyn LocationDirectory>,
}

impl BillingService {
    /// Assemble a service from its three stores.
    pub fn new(
        rates: Arc<dyn RateTable>,
        prices: Arc<dyn PriceTable>,
        locations: Arc<dyn LocationDirectory>,
    ) -> Self {
        Self {
            rates,
            prices,
            locations,
        }
    }
}

impl PricingEngine for BillingService {
    fn calculate_shipping_cost(&self, origin: &str, destination: &str, weight: f64) -> Result<f64> {
        debug!(component = COMPONENT, origin, destination, weight, "calculating shipping cost");

        if origin.is_empty() {
            return Err(ShippingError::invalid_input("empty origin"));
        }
        if destination.is_empty() {
            return Err(ShippingError::invalid_input("empty destination"));
        }

        let origin = self.locations.get_by_code(origin)?;
        let destination = self.locations.get_by_code(destination)?;
        let region = Region::between(&origin, &destination);
        let rate = self.rates.rate_for(region)?;

        let class = WeightClass::for_weight(weight)?;
        let base_price = self.prices.price_for(class)?;

        let total = base_price * rate;
        debug!(
            component = COMPONENT,
            region = region.as_str(),
            class = class.as_str(),
            price = total,
            "priced shipment"
        );
        Ok(total)
    }
}
