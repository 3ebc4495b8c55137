//! Route summary entity

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Total distance and duration of a computed route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    distance_meters: f64,
    duration_seconds: f64,
}

impl RouteResult {
    /// Create a route summary
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if either value is negative or not finite.
    pub fn new(distance_meters: f64, duration_seconds: f64) -> Result<Self, DomainError> {
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(DomainError::ValidationError(format!(
                "route distance must be a non-negative number, got {distance_meters}"
            )));
        }
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(DomainError::ValidationError(format!(
                "route duration must be a non-negative number, got {duration_seconds}"
            )));
        }
        Ok(Self {
            distance_meters,
            duration_seconds,
        })
    }

    /// Total distance in meters
    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// Total duration in seconds
    #[must_use]
    pub const fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Distance in kilometers rounded to two decimals
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        (self.distance_meters / 10.0).round() / 100.0
    }

    /// Duration in whole minutes, rounded
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // validated non-negative
    pub fn duration_minutes(&self) -> u64 {
        (self.duration_seconds / 60.0).round() as u64
    }

    /// Distance as shown in the status area, e.g. `"5.00 km"`
    #[must_use]
    pub fn format_distance(&self) -> String {
        format!("{:.2} km", self.distance_km())
    }

    /// Duration as shown in the status area, e.g. `"10 min"`
    #[must_use]
    pub fn format_duration(&self) -> String {
        format!("{} min", self.duration_minutes())
    }
}

impl fmt::Display for RouteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.format_distance(), self.format_duration())
    }
}
