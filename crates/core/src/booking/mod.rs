//! Booking records, the ledger storing them and the orchestrating service.

mod models;
/// Booking orchestration and identifier generation.
pub mod service;
/// Booking ledger.
pub mod store;

pub use models::{Booking, BookingView};
pub use service::{BookingService, IdGenerator, UuidGenerator};
pub use store::{BookingLedger, InMemoryBookingStore};
