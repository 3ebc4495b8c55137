//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the geocoding, routing and session adapters, configuration
//! loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ENV_PREFIX, MapConfig, SessionAppConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
