//! Scripted event streams for the `replay` command
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   {"location_fix": {"lat": 40.7128, "lng": -74.006}},
//!   {"click": {"lat": 40.7484, "lng": -73.9857}},
//!   {"search": {"role": "b", "query": "5th Ave"}},
//!   "use_current_location",
//!   "clear"
//! ]
//! ```

use std::path::Path;

use application::{PlannerEvent, SelectionEvent};
use domain::{
    DomainError,
    value_objects::{Coordinate, PointRole},
};
use serde::Deserialize;
use thiserror::Error;

/// One scripted user interaction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayStep {
    /// Map click
    Click {
        /// Latitude
        lat: f64,
        /// Longitude
        lng: f64,
    },
    /// Search box submission
    Search {
        /// `a`/`start` or `b`/`destination`
        role: String,
        /// Query text
        query: String,
    },
    /// Device position report
    LocationFix {
        /// Latitude
        lat: f64,
        /// Longitude
        lng: f64,
    },
    /// "Use current location" button
    UseCurrentLocation,
    /// "Clear" button
    Clear,
}

/// Errors reading a replay script
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Script file could not be read
    #[error("Failed to read script {path}: {source}")]
    Io {
        /// Script path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Script is not a valid step list
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    /// A step carries an invalid coordinate
    #[error("Step {index}: {source}")]
    Coordinate {
        /// Zero-based step index
        index: usize,
        /// Validation error
        source: DomainError,
    },

    /// A step names an unknown point role
    #[error("Step {index}: {message}")]
    Role {
        /// Zero-based step index
        index: usize,
        /// Parse error
        message: String,
    },
}

impl ReplayStep {
    /// Convert to a planner event
    pub fn into_event(self, index: usize) -> Result<PlannerEvent, ReplayError> {
        let coordinate = |lat, lng| {
            Coordinate::new(lat, lng).map_err(|source| ReplayError::Coordinate { index, source })
        };

        Ok(match self {
            Self::Click { lat, lng } => SelectionEvent::MapClicked(coordinate(lat, lng)?).into(),
            Self::Search { role, query } => PlannerEvent::Search {
                role: role
                    .parse::<PointRole>()
                    .map_err(|message| ReplayError::Role { index, message })?,
                query,
            },
            Self::LocationFix { lat, lng } => {
                SelectionEvent::LocationFix(coordinate(lat, lng)?).into()
            },
            Self::UseCurrentLocation => PlannerEvent::UseStoredLocation,
            Self::Clear => SelectionEvent::Clear.into(),
        })
    }
}

/// Parse a script into planner events
pub fn parse_script(json: &str) -> Result<Vec<PlannerEvent>, ReplayError> {
    let steps: Vec<ReplayStep> = serde_json::from_str(json)?;
    steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| step.into_event(index))
        .collect()
}

/// Read and parse a script file
pub fn load_script(path: &Path) -> Result<Vec<PlannerEvent>, ReplayError> {
    let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_script(&json)
}
