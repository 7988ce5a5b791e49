#![warn(clippy::all, missing_docs)]

//! HTTP transport, client and process setup for the shipping API.

pub mod cli;
pub mod client;
pub mod http;
pub mod logging;

pub use client::{ClientError, ShippingClient};
pub use http::{router, serve, AppState};
