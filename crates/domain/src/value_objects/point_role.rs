//! Point role value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a selected point plays in the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointRole {
    /// Start of the route
    A,
    /// Destination of the route
    B,
}

impl PointRole {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::A => "Start",
            Self::B => "Destination",
        }
    }
}

impl fmt::Display for PointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "point A"),
            Self::B => write!(f, "point B"),
        }
    }
}

impl std::str::FromStr for PointRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "start" | "from" => Ok(Self::A),
            "b" | "destination" | "end" | "to" => Ok(Self::B),
            _ => Err(format!("Invalid point role: {s}. Use 'a' or 'b'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(PointRole::A.label(), "Start");
        assert_eq!(PointRole::B.label(), "Destination");
    }

    #[test]
    fn test_display() {
        assert_eq!(PointRole::A.to_string(), "point A");
        assert_eq!(PointRole::B.to_string(), "point B");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("a".parse::<PointRole>(), Ok(PointRole::A));
        assert_eq!("Start".parse::<PointRole>(), Ok(PointRole::A));
        assert_eq!("B".parse::<PointRole>(), Ok(PointRole::B));
        assert_eq!("to".parse::<PointRole>(), Ok(PointRole::B));
        assert!("c".parse::<PointRole>().is_err());
    }
}
