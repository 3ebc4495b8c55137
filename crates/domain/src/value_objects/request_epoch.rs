//! Request epoch value object
//!
//! A monotonic counter that fences stale asynchronous responses. Every
//! mutation of the point pair advances the epoch; geocode and route requests
//! carry the epoch that was current when they were issued.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing request generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestEpoch(u64);

impl RequestEpoch {
    /// The epoch of a freshly started session
    pub const INITIAL: Self = Self(0);

    /// Create an epoch from a raw value
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw counter value
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The epoch following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Whether a response tagged with `self` is superseded by `current`
    #[must_use]
    pub fn is_stale(&self, current: Self) -> bool {
        *self < current
    }
}

impl fmt::Display for RequestEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
