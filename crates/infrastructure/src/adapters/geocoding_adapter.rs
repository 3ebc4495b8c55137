//! Geocoding adapter - Implements GeocodingPort using integration_routing

use application::error::ApplicationError;
use application::ports::{GeocodeMatch, GeocodingPort};
use async_trait::async_trait;
use domain::value_objects::Coordinate;
use integration_routing::{GeocodingClient, GeocodingError, OpenCageConfig, OpenCageGeocodingClient};
use tracing::{debug, instrument, warn};

/// Adapter for geocoding via OpenCage
pub struct GeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Wrap an existing geocoding client
    pub fn new(client: impl GeocodingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Create an OpenCage-backed adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn with_config(config: &OpenCageConfig) -> Result<Self, ApplicationError> {
        let client = OpenCageGeocodingClient::new(config).map_err(|e| match e {
            GeocodingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Internal(other.to_string()),
        })?;
        Ok(Self::new(client))
    }

    /// Convert an integration error for a forward lookup
    fn map_error(query: &str, error: GeocodingError) -> ApplicationError {
        match error {
            GeocodingError::AddressNotFound(_) => ApplicationError::GeocodeNotFound(query.to_string()),
            GeocodingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::GeocodeNetwork(other.to_string()),
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self), fields(coordinate = %coordinate))]
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Option<String> {
        match self.client.reverse_geocode(coordinate).await {
            Ok(label) => {
                debug!(%label, "Reverse geocoded");
                Some(label)
            },
            Err(GeocodingError::AddressNotFound(_)) => {
                debug!("No place name for coordinate");
                None
            },
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed");
                None
            },
        }
    }

    #[instrument(skip(self))]
    async fn forward_geocode(&self, query: &str) -> Result<GeocodeMatch, ApplicationError> {
        let place = self.client.geocode(query).await.map_err(|e| {
            warn!(%query, error = %e, "Forward geocoding failed");
            Self::map_error(query, e)
        })?;
        Ok(GeocodeMatch::new(place.coordinate, place.formatted))
    }
}
