//! Geocoding service port
//!
//! Defines the interface for turning free text into coordinates and
//! coordinates into place names. Adapters in the infrastructure layer
//! implement this port using a geocoding API.

use async_trait::async_trait;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// The first candidate returned by a forward geocode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMatch {
    /// Coordinate of the match
    pub coordinate: Coordinate,
    /// Formatted place name
    pub label: String,
}

impl GeocodeMatch {
    /// Create a new match
    #[must_use]
    pub fn new(coordinate: Coordinate, label: impl Into<String>) -> Self {
        Self {
            coordinate,
            label: label.into(),
        }
    }
}

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a place name for a coordinate
    ///
    /// Best effort: every failure collapses to `None`. There is no error
    /// channel, so callers cannot treat a missing name as a hard failure.
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Option<String>;

    /// Resolve free text to the first matching coordinate
    ///
    /// Fails with `GeocodeNotFound` when nothing matches and
    /// `GeocodeNetwork` when the service cannot be used.
    async fn forward_geocode(&self, query: &str) -> Result<GeocodeMatch, ApplicationError>;
}
