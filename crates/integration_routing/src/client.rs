//! OSRM routing client
//!
//! Requests a single driving route between two coordinates from the
//! [OSRM HTTP API](https://project-osrm.org/docs/v5.24.0/api/) and reduces it
//! to total distance and duration.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::OsrmConfig;
use crate::error::RoutingError;
use crate::models::{RawRouteResponse, Route};

/// OSRM status codes that mean "no route between these points"
const NO_ROUTE_CODES: [&str; 2] = ["NoRoute", "NoSegment"];

/// Trait for routing service clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Compute the best route from `start` to `end`
    async fn route(&self, start: Coordinate, end: Coordinate) -> Result<Route, RoutingError>;
}

/// OSRM-based routing client
#[derive(Debug)]
pub struct OsrmRoutingClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmRoutingClient {
    /// Create a new OSRM routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("route-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Build the route URL; OSRM takes `lng,lat` pairs separated by `;`
    fn route_url(&self, start: Coordinate, end: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            start.longitude(),
            start.latitude(),
            end.longitude(),
            end.latitude(),
        )
    }

    /// Parse an OSRM route response body
    fn parse_route_response(body: &str) -> Result<Route, RoutingError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;

        if raw.code != "Ok" {
            let message = raw.message.unwrap_or_default();
            if NO_ROUTE_CODES.contains(&raw.code.as_str()) {
                return Err(RoutingError::NoRoute {
                    code: raw.code,
                    message,
                });
            }
            return Err(RoutingError::RequestFailed(format!("{}: {message}", raw.code)));
        }

        let best = raw.routes.first().ok_or_else(|| RoutingError::NoRoute {
            code: raw.code.clone(),
            message: "response contained no routes".to_string(),
        })?;

        if !best.distance.is_finite()
            || !best.duration.is_finite()
            || best.distance < 0.0
            || best.duration < 0.0
        {
            return Err(RoutingError::ParseError(format!(
                "invalid route summary: {} m, {} s",
                best.distance, best.duration
            )));
        }

        Ok(Route {
            distance_meters: best.distance,
            duration_seconds: best.duration,
        })
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self), fields(start = %start, end = %end))]
    async fn route(&self, start: Coordinate, end: Coordinate) -> Result<Route, RoutingError> {
        let url = self.route_url(start, end);
        let params = [
            ("overview", "false"),
            ("alternatives", "false"),
            ("steps", "false"),
        ];

        debug!(%url, "Requesting route");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoutingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    RoutingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(RoutingError::ServiceUnavailable(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        // OSRM reports NoRoute and friends as HTTP 400 with a JSON body
        match Self::parse_route_response(&body) {
            Ok(route) if status.is_success() => {
                debug!(%route, "Route found");
                Ok(route)
            },
            Ok(_) => Err(RoutingError::RequestFailed(format!("HTTP {status}"))),
            Err(RoutingError::ParseError(_)) if !status.is_success() => {
                Err(RoutingError::RequestFailed(format!("HTTP {status}")))
            },
            Err(e) => {
                warn!(error = %e, "Routing service returned no route");
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OsrmRoutingClient {
        OsrmRoutingClient::new(&OsrmConfig::for_testing()).unwrap()
    }

    #[test]
    fn test_route_url_uses_lng_lat_order() {
        let start = Coordinate::new(40.7484, -73.9857).unwrap();
        let end = Coordinate::new(40.7794, -73.9632).unwrap();
        assert_eq!(
            client().route_url(start, end),
            "https://router.project-osrm.org/route/v1/driving/-73.9857,40.7484;-73.9632,40.7794"
        );
    }

    #[test]
    fn test_route_url_trims_trailing_slash() {
        let config = OsrmConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..OsrmConfig::for_testing()
        };
        let client = OsrmRoutingClient::new(&config).unwrap();
        let here = Coordinate::new(1.0, 2.0).unwrap();
        assert!(client
            .route_url(here, here)
            .starts_with("http://localhost:5000/route/v1/driving/"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = OsrmConfig {
            timeout_secs: 0,
            ..OsrmConfig::default()
        };
        assert!(matches!(
            OsrmRoutingClient::new(&config),
            Err(RoutingError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_parse_first_route() {
        let body = r#"{
            "code": "Ok",
            "routes": [
                {"distance": 5000.0, "duration": 600.0, "weight": 600.0},
                {"distance": 9000.0, "duration": 900.0, "weight": 900.0}
            ],
            "waypoints": []
        }"#;
        let route = OsrmRoutingClient::parse_route_response(body).unwrap();
        assert_eq!(
            route,
            Route {
                distance_meters: 5000.0,
                duration_seconds: 600.0
            }
        );
    }

    #[test]
    fn test_parse_no_route() {
        let body = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;
        let err = OsrmRoutingClient::parse_route_response(body).unwrap_err();
        assert!(err.is_no_route());
    }

    #[test]
    fn test_parse_no_segment() {
        let body = r#"{"code": "NoSegment", "message": "Could not find a matching segment"}"#;
        assert!(OsrmRoutingClient::parse_route_response(body).unwrap_err().is_no_route());
    }

    #[test]
    fn test_parse_ok_without_routes() {
        let body = r#"{"code": "Ok", "routes": []}"#;
        assert!(OsrmRoutingClient::parse_route_response(body).unwrap_err().is_no_route());
    }

    #[test]
    fn test_parse_other_code() {
        let body = r#"{"code": "InvalidQuery", "message": "Query string malformed"}"#;
        let err = OsrmRoutingClient::parse_route_response(body).unwrap_err();
        assert!(matches!(err, RoutingError::RequestFailed(ref m) if m.contains("InvalidQuery")));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            OsrmRoutingClient::parse_route_response("<html>"),
            Err(RoutingError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_negative_distance() {
        let body = r#"{"code": "Ok", "routes": [{"distance": -1.0, "duration": 5.0}]}"#;
        assert!(matches!(
            OsrmRoutingClient::parse_route_response(body),
            Err(RoutingError::ParseError(_))
        ));
    }
}
