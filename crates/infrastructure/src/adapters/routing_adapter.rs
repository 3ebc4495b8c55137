//! Routing adapter - Implements RoutingPort using integration_routing

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{RouteResult, value_objects::Coordinate};
use integration_routing::{OsrmConfig, OsrmRoutingClient, RoutingClient, RoutingError};
use tracing::{debug, instrument, warn};

/// Adapter for driving routes via OSRM
pub struct RoutingAdapter {
    client: Box<dyn RoutingClient>,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("client", &"RoutingClient")
            .finish()
    }
}

impl RoutingAdapter {
    /// Wrap an existing routing client
    pub fn new(client: impl RoutingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Create an OSRM-backed adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn with_config(config: &OsrmConfig) -> Result<Self, ApplicationError> {
        let client = OsrmRoutingClient::new(config).map_err(|e| match e {
            RoutingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Internal(other.to_string()),
        })?;
        Ok(Self::new(client))
    }

    /// Convert an integration error
    fn map_error(error: RoutingError) -> ApplicationError {
        match error {
            RoutingError::NoRoute { code, message } => {
                ApplicationError::RouteNotFound(format!("{code}: {message}"))
            },
            RoutingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::RouteNetwork(other.to_string()),
        }
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self), fields(start = %start, end = %end))]
    async fn compute_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteResult, ApplicationError> {
        let route = self.client.route(start, end).await.map_err(|e| {
            warn!(error = %e, "Route computation failed");
            Self::map_error(e)
        })?;

        let result = RouteResult::new(route.distance_meters, route.duration_seconds)
            .map_err(|e| ApplicationError::RouteNetwork(e.to_string()))?;
        debug!(%result, "Route computed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_route_maps_to_route_not_found() {
        let err = RoutingAdapter::map_error(RoutingError::NoRoute {
            code: "NoRoute".to_string(),
            message: "Impossible route between points".to_string(),
        });
        assert!(matches!(err, ApplicationError::RouteNotFound(ref m) if m.contains("NoRoute")));
    }

    #[test]
    fn test_transport_errors_map_to_network() {
        for error in [
            RoutingError::Timeout { timeout_secs: 10 },
            RoutingError::RateLimitExceeded,
            RoutingError::ServiceUnavailable("HTTP 503".to_string()),
            RoutingError::ParseError("bad".to_string()),
            RoutingError::RequestFailed("InvalidQuery".to_string()),
        ] {
            assert!(matches!(
                RoutingAdapter::map_error(error),
                ApplicationError::RouteNetwork(_)
            ));
        }
    }

    #[test]
    fn test_invalid_config_is_configuration_error() {
        let config = OsrmConfig {
            base_url: String::new(),
            ..OsrmConfig::default()
        };
        assert!(matches!(
            RoutingAdapter::with_config(&config),
            Err(ApplicationError::Configuration(_))
        ));
    }
}
