//! geocode.maps.co search client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::models::{Place, RawPlace};

/// Trait for forward-geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search for a free-form query
    ///
    /// `timeout` overrides the configured default for this call only.
    /// Returns matches in provider order; an empty vector means no match.
    async fn search(
        &self,
        query: &str,
        timeout: Option<Duration>,
    ) -> Result<Vec<Place>, GeocodingError>;

    /// Whether an API key is configured
    fn has_api_key(&self) -> bool;
}

/// HTTP client for geocode.maps.co
#[derive(Debug)]
pub struct MapsCoGeocodingClient {
    client: Client,
    config: GeocodingConfig,
}

impl MapsCoGeocodingClient {
    /// Create a new geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GeocodingClient for MapsCoGeocodingClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        timeout: Option<Duration>,
    ) -> Result<Vec<Place>, GeocodingError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GeocodingError::MissingApiKey)?;

        let deadline = timeout.unwrap_or_else(|| Duration::from_secs(self.config.timeout_secs));
        let params = [("q", query), ("api_key", api_key), ("format", "json")];

        debug!(%query, timeout_ms = deadline.as_millis(), "Geocoding query");

        let response = self
            .client
            .get(self.search_url())
            .query(&params)
            .timeout(deadline)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout {
                        timeout_ms: deadline.as_millis(),
                    }
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(%status, "Geocoding API key rejected");
            return Err(GeocodingError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let raw: Vec<RawPlace> = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GeocodingError::Timeout {
                    timeout_ms: deadline.as_millis(),
                }
            } else {
                GeocodingError::ParseError(e.to_string())
            }
        })?;

        let total = raw.len();
        let places: Vec<Place> = raw.into_iter().filter_map(RawPlace::into_place).collect();
        if places.len() < total {
            debug!(dropped = total - places.len(), "Skipped matches with unreadable coordinates");
        }
        debug!(%query, matches = places.len(), "Geocoded");

        Ok(places)
    }

    fn has_api_key(&self) -> bool {
        self.config.has_api_key()
    }
}
