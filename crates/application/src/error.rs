//! Application-level errors

use domain::{DomainError, RequestEpoch};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Free-text search returned no candidates
    #[error("Location not found: {0}")]
    GeocodeNotFound(String),

    /// Geocoding service could not be reached or answered with an error
    #[error("Geocoding failed: {0}")]
    GeocodeNetwork(String),

    /// A destination was set before a start point
    #[error("Start location required: {0}")]
    RoutePrecondition(String),

    /// Routing service found no route between the points
    #[error("No route found: {0}")]
    RouteNotFound(String),

    /// Routing service could not be reached or answered with an error
    #[error("Routing failed: {0}")]
    RouteNetwork(String),

    /// A response arrived for a superseded request and was ignored
    #[error("Stale response discarded (issued {issued}, current {current})")]
    StaleResponseDiscarded {
        /// Epoch the request was issued in
        issued: RequestEpoch,
        /// Epoch current when the response arrived
        current: RequestEpoch,
    },

    /// No authenticated session
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether this error is shown to the user as a blocking message
    ///
    /// Routing failures are shown in the status area instead, and stale
    /// responses are never shown.
    pub const fn is_blocking(&self) -> bool {
        matches!(
            self,
            Self::RoutePrecondition(_)
                | Self::GeocodeNotFound(_)
                | Self::GeocodeNetwork(_)
                | Self::NotAuthorized(_)
        )
    }

    /// Whether this error only signals an ignored, superseded response
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::StaleResponseDiscarded { .. })
    }

    /// Short message for the user interface
    pub fn user_message(&self) -> String {
        match self {
            Self::RoutePrecondition(_) | Self::Domain(DomainError::MissingStartPoint(_)) => {
                "Please set the start location first.".to_string()
            },
            Self::GeocodeNotFound(_) => "Location not found.".to_string(),
            Self::GeocodeNetwork(_) => "Geocoding failed.".to_string(),
            Self::RouteNotFound(_) => "No route found between these points.".to_string(),
            Self::RouteNetwork(_) => "Route calculation failed. Please try again.".to_string(),
            Self::NotAuthorized(_) => "Please sign in to plan a route.".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_errors() {
        assert!(ApplicationError::RoutePrecondition("x".to_string()).is_blocking());
        assert!(ApplicationError::GeocodeNotFound("x".to_string()).is_blocking());
        assert!(ApplicationError::GeocodeNetwork("x".to_string()).is_blocking());
        assert!(!ApplicationError::RouteNotFound("x".to_string()).is_blocking());
        assert!(!ApplicationError::RouteNetwork("x".to_string()).is_blocking());
        assert!(
            !ApplicationError::StaleResponseDiscarded {
                issued: RequestEpoch::from_raw(1),
                current: RequestEpoch::from_raw(2),
            }
            .is_blocking()
        );
    }

    #[test]
    fn stale_detection() {
        let err = ApplicationError::StaleResponseDiscarded {
            issued: RequestEpoch::from_raw(1),
            current: RequestEpoch::from_raw(2),
        };
        assert!(err.is_stale());
        assert!(err.to_string().contains("#1"));
        assert!(err.to_string().contains("#2"));
        assert!(!ApplicationError::Internal("x".to_string()).is_stale());
    }

    #[test]
    fn user_messages() {
        assert_eq!(
            ApplicationError::RoutePrecondition("start location required".to_string())
                .user_message(),
            "Please set the start location first."
        );
        assert_eq!(
            ApplicationError::GeocodeNotFound("Atlantis".to_string()).user_message(),
            "Location not found."
        );
        assert_eq!(
            ApplicationError::GeocodeNetwork("timeout".to_string()).user_message(),
            "Geocoding failed."
        );
    }

    #[test]
    fn domain_precondition_maps_to_same_message() {
        let err: ApplicationError = DomainError::MissingStartPoint("point B".to_string()).into();
        assert_eq!(err.user_message(), "Please set the start location first.");
    }
}
