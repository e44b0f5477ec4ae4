//! Provider configurations: geocoding and fare prediction.

use std::time::Duration;

use application::ResolverConfig;
use integration_geocoding::GeocodingConfig;
use integration_prediction::PredictionConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Geocoding Configuration
// ==============================

/// geocode.maps.co configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Provider base URL
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    ///
    /// May also be supplied as the plain `GEOCODING_API_KEY` variable.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Deadline for each address resolution query in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,

    /// Deadline for autocomplete queries in seconds
    #[serde(default = "default_suggest_timeout")]
    pub suggest_timeout_secs: u64,

    /// Pause before each autocomplete query in milliseconds
    #[serde(default = "default_suggest_delay")]
    pub suggest_delay_ms: u64,

    /// Maximum number of autocomplete suggestions
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_geocoding_base_url() -> String {
    "https://geocode.maps.co".to_string()
}

const fn default_geocoding_timeout() -> u64 {
    10
}

const fn default_suggest_timeout() -> u64 {
    5
}

const fn default_suggest_delay() -> u64 {
    100
}

const fn default_max_suggestions() -> usize {
    5
}

impl std::fmt::Debug for GeocodingAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("suggest_timeout_secs", &self.suggest_timeout_secs)
            .field("suggest_delay_ms", &self.suggest_delay_ms)
            .field("max_suggestions", &self.max_suggestions)
            .finish()
    }
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            api_key: None,
            timeout_secs: default_geocoding_timeout(),
            suggest_timeout_secs: default_suggest_timeout(),
            suggest_delay_ms: default_suggest_delay(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl GeocodingAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Convert to `integration_geocoding` config
    #[must_use]
    pub fn to_geocoding_config(&self) -> GeocodingConfig {
        GeocodingConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().trim().to_string())
                .filter(|k| !k.is_empty()),
            timeout_secs: self.timeout_secs,
            ..GeocodingConfig::default()
        }
    }

    /// Resolver timings derived from this section
    #[must_use]
    pub fn to_resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            resolve_timeout: Duration::from_secs(self.timeout_secs),
            suggest_timeout: Duration::from_secs(self.suggest_timeout_secs),
            suggest_delay: Duration::from_millis(self.suggest_delay_ms),
            max_suggestions: self.max_suggestions,
        }
    }

    pub(super) fn validate(&self) -> Result<(), String> {
        self.to_geocoding_config()
            .validate()
            .map_err(|e| format!("geocoding: {e}"))?;
        if self.suggest_timeout_secs == 0 {
            return Err("geocoding: suggest_timeout_secs must be greater than 0".to_string());
        }
        if self.max_suggestions == 0 {
            return Err("geocoding: max_suggestions must be greater than 0".to_string());
        }
        Ok(())
    }
}

// ==============================
// Prediction Configuration
// ==============================

/// Fare prediction service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionAppConfig {
    /// Service base URL; requests go to `{base_url}/predict`
    #[serde(default = "default_prediction_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_prediction_timeout")]
    pub timeout_secs: u64,
}

fn default_prediction_base_url() -> String {
    PredictionConfig::default().base_url
}

const fn default_prediction_timeout() -> u64 {
    10
}

impl Default for PredictionAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_prediction_base_url(),
            timeout_secs: default_prediction_timeout(),
        }
    }
}

impl PredictionAppConfig {
    /// Convert to `integration_prediction` config
    #[must_use]
    pub fn to_prediction_config(&self) -> PredictionConfig {
        PredictionConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub(super) fn validate(&self) -> Result<(), String> {
        self.to_prediction_config()
            .validate()
            .map_err(|e| format!("prediction: {e}"))
    }
}
