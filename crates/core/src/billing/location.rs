use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShippingError};

/// A shipping endpoint identified by its country code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    code: String,
    eu_member: bool,
}

impl Location {
    /// Build a location, rejecting an empty code.
    pub fn new(code: impl Into<String>, eu_member: bool) -> Result<Self> {
        let code = code.into();
        if code.is_empty() {
            return Err(ShippingError::invalid_input("empty code"));
        }
        Ok(Self { code, eu_member })
    }

    /// Location code, compared verbatim.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether the location belongs to the EU.
    pub fn is_eu_member(&self) -> bool {
        self.eu_member
    }
}

/// Classification of an origin/destination pair that drives the rate multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Origin and destination share a code.
    Domestic,
    /// Both endpoints are EU members.
    Eu,
    /// Anything else.
    International,
}

impl Region {
    /// Every region, in classification priority order.
    pub const ALL: [Region; 3] = [Region::Domestic, Region::Eu, Region::International];

    /// Lowercase label used in rate tables and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Domestic => "domestic",
            Region::Eu => "eu",
            Region::International => "international",
        }
    }

    /// Classify a pair of locations.
    ///
    /// Equal codes win over EU membership; codes are not normalised, so `se` and
    /// `SE` are different locations.
    pub fn between(origin: &Location, destination: &Location) -> Self {
        if origin.code() == destination.code() {
            Region::Domestic
        } else if origin.is_eu_member() && destination.is_eu_member() {
            Region::Eu
        } else {
            Region::International
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ShippingError;

    fn from_str(label: &str) -> Result<Self> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == label)
            .ok_or_else(|| ShippingError::invalid_input(format!("unknown region {label}")))
    }
}

/// Lookup of locations by code.
pub trait LocationDirectory: Send + Sync {
    /// Resolve a code, failing with `NotFound` when it is unknown.
    fn get_by_code(&self, code: &str) -> Result<Location>;
}

/// Thread-safe in-memory location directory.
///
/// Lookups share a read lock; [`InMemoryLocationStore::add`] takes the write lock
/// for a single insert. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocationStore {
    locations: Arc<RwLock<HashMap<String, Location>>>,
}

impl InMemoryLocationStore {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the location stored under its code.
    pub fn add(&self, location: Location) {
        self.locations
            .write()
            .insert(location.code().to_string(), location);
    }

    /// Number of known locations.
    pub fn len(&self) -> usize {
        self.locations.read().len()
    }

    /// Whether no location has been added yet.
    pub fn is_empty(&self) -> bool {
        self.locations.read().is_empty()
    }

    /// Known codes in ascending order.
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<_> = self.locations.read().keys().cloned().collect();
        codes.sort();
        codes
    }
}

impl LocationDirectory for InMemoryLocationStore {
    fn get_by_code(&self, code: &str) -> Result<Location> {
        self.locations
            .read()
            .get(code)
            .cloned()
            .ok_or_else(|| ShippingError::not_found(format!("no location with code {code}")))
    }
}
