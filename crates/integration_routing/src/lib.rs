//! Routing and geocoding integration for the route planner
//!
//! Provides driving routes via the [OSRM](https://project-osrm.org) HTTP API
//! and forward/reverse geocoding via the
//! [OpenCage](https://opencagedata.com) API.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with other integration crates.
//! [`RoutingClient`] defines the interface for route computation, implemented by
//! [`OsrmRoutingClient`]. [`GeocodingClient`] handles text-to-coordinate and
//! coordinate-to-text conversion via [`OpenCageGeocodingClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_routing::{OsrmConfig, OsrmRoutingClient, RoutingClient};
//!
//! let client = OsrmRoutingClient::new(&OsrmConfig::default())?;
//! let route = client.route(start, end).await?;
//! println!("{} m in {} s", route.distance_meters, route.duration_seconds);
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{OsrmRoutingClient, RoutingClient};
pub use config::OsrmConfig;
pub use error::RoutingError;
pub use geocoding::{GeocodingClient, GeocodingError, OpenCageConfig, OpenCageGeocodingClient};
pub use models::{GeocodedPlace, Route};
