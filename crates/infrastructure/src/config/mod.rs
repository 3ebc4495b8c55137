//! Application configuration
//!
//! Split into focused sub-modules:
//! - `map`: initial map view
//! - `session`: signed-in user and event loop sizing
//!
//! Geocoding and routing settings reuse the integration crate's config
//! types; telemetry settings live next to the subscriber setup.

mod map;
mod session;

use std::path::Path;

use integration_routing::{OpenCageConfig, OsrmConfig};
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

pub use map::MapConfig;
pub use session::SessionAppConfig;

/// Environment variable prefix, e.g. `ROUTE_PLANNER_ROUTING__PROFILE`
pub const ENV_PREFIX: &str = "ROUTE_PLANNER";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: OpenCageConfig,

    /// Routing service configuration
    #[serde(default)]
    pub routing: OsrmConfig,

    /// Planning session configuration
    #[serde(default)]
    pub session: SessionAppConfig,

    /// Initial map view
    #[serde(default)]
    pub map: MapConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from environment and an optional file
    ///
    /// Without a path, `config.{toml,json,...}` in the working directory is
    /// used when present. An explicit path must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Load from file
            .add_source(file)
            // Override with environment variables (e.g., ROUTE_PLANNER_GEOCODING__API_KEY)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns all problems found, one per line, prefixed with the section.
    pub fn validate(&self) -> Result<(), String> {
        let problems: Vec<String> = [
            ("geocoding", self.geocoding.validate()),
            ("routing", self.routing.validate()),
            ("session", self.session.validate()),
            ("map", self.map.validate()),
        ]
        .into_iter()
        .filter_map(|(section, result)| result.err().map(|e| format!("{section}: {e}")))
        .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("\n"))
        }
    }
}
