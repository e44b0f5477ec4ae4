//! Provider readiness checks
//!
//! Reports whether the geocoding provider has a credential and whether the
//! prediction service answers, each under its own timeout.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{FarePredictionPort, GeocodingPort};

const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Report key of the geocoding provider
const GEOCODING: &str = "geocoding";
/// Report key of the prediction service
const PREDICTION: &str = "prediction";

/// Configuration for health check behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Timeout for each provider probe in seconds (default: 5)
    #[serde(default = "default_global_timeout")]
    pub global_timeout_secs: u64,
}

const fn default_global_timeout() -> u64 {
    DEFAULT_HEALTH_CHECK_TIMEOUT_SECS
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            global_timeout_secs: default_global_timeout(),
        }
    }
}

/// Status of an individual provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Whether the provider is usable
    pub healthy: bool,
    /// Optional additional information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Probe duration in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    /// Healthy with a note
    #[must_use]
    pub fn healthy_with_info(info: impl Into<String>) -> Self {
        Self {
            healthy: true,
            info: Some(info.into()),
            response_time_ms: None,
            error: None,
        }
    }

    /// Unhealthy with a reason
    #[must_use]
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            info: None,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }

    /// Probe did not finish in time
    #[must_use]
    pub fn timeout() -> Self {
        Self::unhealthy("Health check timed out")
    }

    /// Attach the probe duration
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Combined readiness report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True when fares can be quoted
    ///
    /// Only the prediction service counts: without a geocoding key,
    /// coordinates can still be entered by hand.
    pub ready: bool,
    /// Per-provider status
    pub services: HashMap<String, ServiceHealth>,
    /// When the probes ran
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    /// Create a report; readiness follows the `prediction` entry
    #[must_use]
    pub fn new(services: HashMap<String, ServiceHealth>) -> Self {
        let ready = services.get(PREDICTION).is_some_and(|s| s.healthy);
        Self {
            ready,
            services,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Status of one provider
    #[must_use]
    pub fn service_status(&self, name: &str) -> Option<&ServiceHealth> {
        self.services.get(name)
    }
}

/// Readiness probes for both external providers
pub struct HealthService {
    config: HealthConfig,
    geocoding: Arc<dyn GeocodingPort>,
    prediction: Arc<dyn FarePredictionPort>,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("config", &self.config)
            .field("geocoding", &"<GeocodingPort>")
            .field("prediction", &"<FarePredictionPort>")
            .finish()
    }
}

impl HealthService {
    /// Create a health service
    #[must_use]
    pub fn new(geocoding: Arc<dyn GeocodingPort>, prediction: Arc<dyn FarePredictionPort>) -> Self {
        Self {
            config: HealthConfig::default(),
            geocoding,
            prediction,
        }
    }

    /// Set the health check configuration
    #[must_use]
    pub fn with_config(mut self, config: HealthConfig) -> Self {
        self.config = config;
        self
    }

    /// Run all probes
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let mut services = HashMap::new();
        services.insert(GEOCODING.to_string(), self.check_geocoding());
        services.insert(PREDICTION.to_string(), self.check_prediction().await);
        HealthReport::new(services)
    }

    /// Geocoding is usable when a credential is configured
    pub fn check_geocoding(&self) -> ServiceHealth {
        if self.geocoding.is_configured() {
            ServiceHealth::healthy_with_info("API key configured")
        } else {
            ServiceHealth::unhealthy("Geocoding API key not configured")
        }
    }

    /// Probe the prediction service
    #[instrument(skip(self))]
    pub async fn check_prediction(&self) -> ServiceHealth {
        let start = Instant::now();
        let limit = Duration::from_secs(self.config.global_timeout_secs);

        if let Ok(available) = timeout(limit, self.prediction.is_available()).await {
            #[allow(clippy::cast_possible_truncation)]
            let response_time = start.elapsed().as_millis() as u64;
            if available {
                debug!(response_time_ms = response_time, "Prediction service reachable");
                ServiceHealth::healthy_with_info("reachable").with_response_time(response_time)
            } else {
                warn!(response_time_ms = response_time, "Prediction service unreachable");
                ServiceHealth::unhealthy("Prediction service unavailable")
                    .with_response_time(response_time)
            }
        } else {
            warn!("Prediction health check timed out");
            ServiceHealth::timeout()
        }
    }
}
