//! Resilience configurations: Telemetry and health checks.

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

// ==============================
// Telemetry Configuration
// ==============================

/// Telemetry configuration for OpenTelemetry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// Enable OTLP export
    #[serde(default)]
    pub enabled: bool,

    /// OTLP endpoint URL
    #[serde(default = "default_otlp_endpoint")]
    pub otlp_endpoint: String,

    /// Sample ratio (0.0 to 1.0)
    #[serde(default)]
    pub sample_ratio: Option<f64>,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_otlp_endpoint() -> String {
    "http://localhost:4317".to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: default_otlp_endpoint(),
            sample_ratio: Some(1.0),
            log_filter: None,
        }
    }
}

impl TelemetryAppConfig {
    /// Convert to the telemetry initializer settings
    #[must_use]
    pub fn to_telemetry_config(&self, json_logs: bool) -> TelemetryConfig {
        let defaults = TelemetryConfig::default();
        TelemetryConfig {
            enabled: self.enabled,
            endpoint: self.otlp_endpoint.clone(),
            sampling_ratio: self
                .sample_ratio
                .map_or(defaults.sampling_ratio, |r| r.clamp(0.0, 1.0)),
            log_filter: self.log_filter.clone().unwrap_or(defaults.log_filter),
            json_logs,
            ..defaults
        }
    }
}

// ==============================
// Health Check Configuration
// ==============================

/// Health check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAppConfig {
    /// Timeout for each provider probe in seconds
    #[serde(default = "default_health_global_timeout")]
    pub global_timeout_secs: u64,
}

const fn default_health_global_timeout() -> u64 {
    5
}

impl Default for HealthAppConfig {
    fn default() -> Self {
        Self {
            global_timeout_secs: default_health_global_timeout(),
        }
    }
}

impl HealthAppConfig {
    /// Convert to `application::HealthConfig`
    #[must_use]
    pub const fn to_health_config(&self) -> application::HealthConfig {
        application::HealthConfig {
            global_timeout_secs: self.global_timeout_secs,
        }
    }
}
