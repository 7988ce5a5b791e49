#![warn(clippy::all, missing_docs)]

//! Core domain logic for the shipping API.
//!
//! This crate hosts the pricing engine, the booking ledger and orchestrator,
//! the shared error taxonomy, and the configuration and seeding used by the
//! HTTP server and any future frontends.

pub mod billing;
pub mod booking;
pub mod config;
pub mod error;
pub mod seed;

pub use billing::{BillingService, Location, PricingEngine, Region, WeightClass};
pub use booking::{Booking, BookingService, BookingView};
pub use config::AppConfig;
pub use error::{ErrorKind, Result, ShippingError};
pub use seed::{LocationSeed, SeedData, ShippingCore};
