//! OpenCage geocoding client
//!
//! Converts free-form place names to coordinates and coordinates to place
//! names using the [OpenCage](https://opencagedata.com/api) API.
//!
//! Forward results are cached (1h TTL by default) so repeated searches for
//! the same text do not hit the API.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{GeocodedPlace, RawGeocodeResponse};

/// Configuration for the OpenCage geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenCageConfig {
    /// Base URL for the OpenCage API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Forward geocode cache TTL in minutes (0 to disable)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,

    /// Preferred result language (IETF tag, e.g. "en"); service default if unset
    #[serde(default)]
    pub language: Option<String>,
}

fn default_geocoding_base_url() -> String {
    "https://api.opencagedata.com".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_minutes() -> u64 {
    60
}

impl Default for OpenCageConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            api_key: None,
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            language: None,
        }
    }
}

impl OpenCageConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self
            .api_key
            .as_ref()
            .is_none_or(|key| key.expose_secret().trim().is_empty())
        {
            return Err("api_key is required".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Query could not be resolved
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// API key missing, invalid or out of quota
    #[error("Geocoding not authorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Configuration error
    #[error("Geocoding configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve free text to the first matching place
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, GeocodingError>;

    /// Resolve a coordinate to a formatted place name
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String, GeocodingError>;
}

/// OpenCage-based geocoding client with forward-result caching
#[derive(Debug)]
pub struct OpenCageGeocodingClient {
    client: Client,
    config: OpenCageConfig,
    api_key: SecretString,
    cache: Option<Cache<String, GeocodedPlace>>,
}

impl OpenCageGeocodingClient {
    /// Create a new OpenCage geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OpenCageConfig) -> Result<Self, GeocodingError> {
        config.validate().map_err(GeocodingError::ConfigurationError)?;
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| GeocodingError::ConfigurationError("api_key is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("route-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_minutes * 60))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
            cache,
        })
    }

    /// Run one OpenCage query and return the first usable result
    async fn query(&self, q: &str) -> Result<(Coordinate, Option<String>), GeocodingError> {
        let url = format!(
            "{}/geocode/v1/json",
            self.config.base_url.trim_end_matches('/')
        );
        let mut params = vec![
            ("q", q),
            ("key", self.api_key.expose_secret()),
            ("limit", "1"),
            ("no_annotations", "1"),
        ];
        if let Some(language) = &self.config.language {
            params.push(("language", language.as_str()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::PAYMENT_REQUIRED | StatusCode::FORBIDDEN => {
                return Err(GeocodingError::Unauthorized(format!("HTTP {status}")));
            },
            StatusCode::TOO_MANY_REQUESTS => return Err(GeocodingError::RateLimitExceeded),
            s if !s.is_success() => {
                return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
            },
            _ => {},
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Self::parse_first_result(&body, q)
    }

    /// Parse an OpenCage response body down to its first result
    fn parse_first_result(
        body: &str,
        q: &str,
    ) -> Result<(Coordinate, Option<String>), GeocodingError> {
        let raw: RawGeocodeResponse =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let first = raw
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::AddressNotFound(q.to_string()))?;

        let geometry = first
            .geometry
            .ok_or_else(|| GeocodingError::ParseError("result has no geometry".to_string()))?;

        let coordinate = Coordinate::new(geometry.lat, geometry.lng)
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let formatted = first.formatted.filter(|f| !f.trim().is_empty());
        Ok((coordinate, formatted))
    }
}

#[async_trait]
impl GeocodingClient for OpenCageGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodingError::AddressNotFound(
                "Query must not be empty".to_string(),
            ));
        }

        let cache_key = query.to_lowercase();
        if let Some(cache) = &self.cache {
            if let Some(place) = cache.get(&cache_key).await {
                debug!(%query, "Geocoding cache hit");
                return Ok(place);
            }
        }

        debug!(%query, "Geocoding query");

        let (coordinate, formatted) = self.query(query).await?;
        let place = GeocodedPlace {
            coordinate,
            formatted: formatted.unwrap_or_else(|| query.to_string()),
        };

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, place.clone()).await;
        }
        debug!(%query, coordinate = %place.coordinate, "Geocoded query");

        Ok(place)
    }

    #[instrument(skip(self), fields(coordinate = %coordinate))]
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String, GeocodingError> {
        let q = format!("{},{}", coordinate.latitude(), coordinate.longitude());

        debug!(%q, "Reverse geocoding");

        let (_, formatted) = self.query(&q).await?;
        formatted.ok_or(GeocodingError::AddressNotFound(q))
    }
}
