//! Logging and tracing infrastructure
//!
//! Provides `tracing-subscriber` setup with an `EnvFilter` and optional JSON
//! output.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
