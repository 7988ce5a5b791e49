//! Error taxonomy shared by the billing and booking services.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type returned by every core operation.
pub type Result<T> = std::result::Result<T, ShippingError>;

/// Classification of a [`ShippingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A caller supplied value violates a precondition.
    InvalidInput,
    /// The referenced location or booking does not exist.
    NotFound,
    /// A booking with the requested id already exists.
    Conflict,
    /// An invariant that should always hold was violated (configuration or programming defect).
    Internal,
}

impl ErrorKind {
    /// Stable lowercase label, used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed failure carrying an [`ErrorKind`] and a human readable message.
///
/// The message alone is rendered by `Display`; callers branch on [`ShippingError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ShippingError {
    kind: ErrorKind,
    message: String,
}

impl ShippingError {
    /// Build an error from a kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for [`ErrorKind::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Shorthand for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Shorthand for [`ErrorKind::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Shorthand for [`ErrorKind::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Kind discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}
