//! Geocoding service port
//!
//! Defines the interface for turning free-text queries into coordinate
//! candidates. Adapters in the infrastructure layer implement this port.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// One raw match returned by the geocoding provider
///
/// Candidates are not yet checked against the service area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Provider's human-readable name for the match
    pub display_name: Option<String>,
}

impl GeocodeCandidate {
    /// Create a candidate
    pub fn new(latitude: f64, longitude: f64, display_name: Option<String>) -> Self {
        Self {
            latitude,
            longitude,
            display_name,
        }
    }
}

/// Port for forward geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search for a query, waiting at most `timeout`
    ///
    /// Returns candidates in provider order. An empty vector means the
    /// provider answered but found nothing.
    ///
    /// Errors: `ApplicationError::Timeout` when the deadline passes,
    /// `ApplicationError::ExternalService` for connection failures, non-success
    /// statuses and malformed bodies, `ApplicationError::Configuration` when no
    /// credential is available.
    async fn search(
        &self,
        query: &str,
        timeout: Duration,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError>;

    /// Whether a provider credential is configured
    fn is_configured(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeocodingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }

    #[test]
    fn candidate_serialization() {
        let c = GeocodeCandidate::new(40.758, -73.9855, Some("Times Square".into()));
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("Times Square"));
    }
}
