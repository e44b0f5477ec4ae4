//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use std::time::Duration;

use application::error::ApplicationError;
use application::ports::{GeocodeCandidate, GeocodingPort};
use async_trait::async_trait;
use integration_geocoding::{
    GeocodingClient, GeocodingConfig, GeocodingError, MapsCoGeocodingClient, Place,
};
use tracing::{debug, instrument};

/// Adapter for the geocode.maps.co search API
pub struct GeocodingAdapter {
    client: MapsCoGeocodingClient,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"MapsCoGeocodingClient")
            .field("configured", &self.client.has_api_key())
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: GeocodingConfig) -> Result<Self, ApplicationError> {
        let client = MapsCoGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration geocoding error to application error
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::Timeout { .. } => ApplicationError::Timeout(err.to_string()),
            GeocodingError::MissingApiKey | GeocodingError::Unauthorized { .. } => {
                ApplicationError::Configuration(err.to_string())
            },
            GeocodingError::ConnectionFailed(_)
            | GeocodingError::RequestFailed { .. }
            | GeocodingError::ParseError(_) => ApplicationError::ExternalService(err.to_string()),
        }
    }

    fn map_place(place: Place) -> GeocodeCandidate {
        GeocodeCandidate::new(place.lat, place.lon, place.display_name)
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self), fields(timeout_ms = timeout.as_millis()))]
    async fn search(
        &self,
        query: &str,
        timeout: Duration,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
        let result = self
            .client
            .search(query, Some(timeout))
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(places) => debug!(matches = places.len(), "Geocoding search complete"),
            Err(e) => debug!(error = %e, "Geocoding search failed"),
        }

        result.map(|places| places.into_iter().map(Self::map_place).collect())
    }

    fn is_configured(&self) -> bool {
        self.client.has_api_key()
    }
}
