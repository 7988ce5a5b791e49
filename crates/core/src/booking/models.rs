use serde::{Deserialize, Serialize};

use crate::error::{Result, ShippingError};

/// Immutable record of a priced shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: String,
    origin: String,
    destination: String,
    weight: f64,
    price: f64,
}

impl Booking {
    /// Validate and build a booking.
    ///
    /// Weight must be strictly positive and price non-negative.
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        weight: f64,
        price: f64,
    ) -> Result<Self> {
        let id = id.into();
        let origin = origin.into();
        let destination = destination.into();

        if id.is_empty() {
            return Err(ShippingError::invalid_input("id is empty"));
        }
        if origin.is_empty() {
            return Err(ShippingError::invalid_input("origin is empty"));
        }
        if destination.is_empty() {
            return Err(ShippingError::invalid_input("destination is empty"));
        }
        if weight.is_nan() || weight <= 0.0 {
            return Err(ShippingError::invalid_input("invalid weight"));
        }
        if price.is_nan() || price < 0.0 {
            return Err(ShippingError::invalid_input("invalid price"));
        }

        Ok(Self {
            id,
            origin,
            destination,
            weight,
            price,
        })
    }

    /// Unique booking identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Origin location code.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destination location code.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Shipment weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Quoted price, unrounded.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Presentation copy labelled with a display currency.
    pub fn view(&self, currency: &str) -> BookingView {
        BookingView {
            id: self.id.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            weight: self.weight,
            price: self.price,
            currency: currency.to_string(),
        }
    }
}

/// Booking as shown to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    /// Booking identifier.
    pub id: String,
    /// Origin location code.
    pub origin: String,
    /// Destination location code.
    pub destination: String,
    /// Shipment weight.
    pub weight: f64,
    /// Quoted price.
    pub price: f64,
    /// Display label; no conversion is applied to `price`.
    pub currency: String,
}
