//! Application layer - Use cases and orchestration
//!
//! Contains the point-selection state machine, the route session lifecycle,
//! the planner that couples them to the geocoding and routing ports, and the
//! event loop that drives a planning session.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
