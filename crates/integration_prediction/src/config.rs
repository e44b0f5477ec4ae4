//! Prediction service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the fare prediction service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Base URL; `/predict` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://taxifare-812256971571.europe-west1.run.app".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PredictionConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 1,
        }
    }

    /// Full URL of the predict endpoint
    #[must_use]
    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url.trim_end_matches('/'))
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

        url::Url::parse(&self.base_url).map_err(|e| format!("base_url is not a URL: {e}"))?;

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PredictionConfig::default();
        assert_eq!(
            config.base_url,
            "https://taxifare-812256971571.europe-west1.run.app"
        );
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_predict_url_has_single_slash() {
        let config = PredictionConfig::for_testing("http://localhost:8000/");
        assert_eq!(config.predict_url(), "http://localhost:8000/predict");
        let config = PredictionConfig::for_testing("http://localhost:8000");
        assert_eq!(config.predict_url(), "http://localhost:8000/predict");
    }

    #[test]
    fn test_validation() {
        assert!(PredictionConfig::default().validate().is_ok());
        assert!(PredictionConfig::for_testing("").validate().is_err());
        assert!(PredictionConfig::for_testing("::nope").validate().is_err());
        assert!(
            PredictionConfig {
                timeout_secs: 0,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: PredictionConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:8000"}"#).unwrap();
        assert_eq!(config.timeout_secs, 10);
    }
}
