//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `providers`: geocoding and fare prediction services
//! - `session`: per-browser trip sessions
//! - `resilience`: telemetry and health checks
//!
//! Sources, lowest priority first: built-in defaults, an optional
//! `config.toml` in the working directory, then `TAXIFARE_`-prefixed
//! environment variables with `__` between nested keys
//! (`TAXIFARE_GEOCODING__API_KEY`, `TAXIFARE_SERVER__PORT`). The geocoding
//! key is additionally read from plain `GEOCODING_API_KEY` when no other
//! source set it.

mod providers;
mod resilience;
mod server;
mod session;

use std::collections::HashMap;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use providers::{GeocodingAppConfig, PredictionAppConfig};
pub use resilience::{HealthAppConfig, TelemetryAppConfig};
pub use server::ServerConfig;
pub use session::SessionAppConfig;

/// Environment variable prefix for all settings
pub const ENV_PREFIX: &str = "TAXIFARE";

/// Plain variable accepted for the geocoding credential
pub const GEOCODING_API_KEY_VAR: &str = "GEOCODING_API_KEY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Geocoding provider configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Fare prediction service configuration
    #[serde(default)]
    pub prediction: PredictionAppConfig,

    /// Session storage configuration
    #[serde(default)]
    pub session: SessionAppConfig,

    /// Health check configuration
    #[serde(default)]
    pub health: HealthAppConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(config::File::with_name("config").required(false), None)
    }

    /// Load from an explicit file source and, optionally, an explicit set of
    /// environment variables instead of the process environment
    pub fn load_from<S>(
        file: S,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let plain_key = match &vars {
            Some(map) => map.get(GEOCODING_API_KEY_VAR).cloned(),
            None => std::env::var(GEOCODING_API_KEY_VAR).ok(),
        };

        let builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        if !config.geocoding.has_api_key() {
            if let Some(key) = plain_key.filter(|k| !k.trim().is_empty()) {
                debug!("Using geocoding API key from {GEOCODING_API_KEY_VAR}");
                config.geocoding.api_key = Some(SecretString::from(key));
            }
        }

        Ok(config)
    }

    /// Check URLs, timeouts and limits
    ///
    /// A missing geocoding key is not an error: the app runs with address
    /// search disabled and manual coordinates still work.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.host.trim().is_empty() {
            return Err("server: host must not be empty".to_string());
        }
        if self.server.max_body_size_json_bytes == 0 {
            return Err("server: max_body_size_json_bytes must be greater than 0".to_string());
        }
        self.geocoding.validate()?;
        self.prediction.validate()?;
        self.session.validate()?;
        if self.health.global_timeout_secs == 0 {
            return Err("health: global_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::{File, FileFormat};
    use secrecy::ExposeSecret;

    use super::*;

    fn empty_file() -> File<config::FileSourceString, FileFormat> {
        File::from_str("", FileFormat::Toml)
    }

    fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_load_without_sources() {
        let config = AppConfig::load_from(empty_file(), vars(&[])).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.session.cookie_name, "taxifare_session");
        assert!(!config.geocoding.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_are_applied() {
        let toml = r#"
            [server]
            port = 8080
            log_format = "json"

            [geocoding]
            api_key = "from-file"
            max_suggestions = 3

            [prediction]
            base_url = "http://localhost:8000"
        "#;
        let config =
            AppConfig::load_from(File::from_str(toml, FileFormat::Toml), vars(&[])).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.server.json_logs());
        assert_eq!(config.geocoding.max_suggestions, 3);
        assert_eq!(
            config.geocoding.api_key.as_ref().unwrap().expose_secret(),
            "from-file"
        );
        assert_eq!(config.prediction.base_url, "http://localhost:8000");
    }

    #[test]
    fn prefixed_environment_overrides_file() {
        let toml = "[server]\nport = 8080\n";
        let config = AppConfig::load_from(
            File::from_str(toml, FileFormat::Toml),
            vars(&[
                ("TAXIFARE_SERVER__PORT", "9090"),
                ("TAXIFARE_GEOCODING__API_KEY", "env-key"),
                ("TAXIFARE_SESSION__IDLE_TIMEOUT_MINUTES", "15"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.session.idle_timeout_minutes, 15);
        assert_eq!(
            config.geocoding.api_key.as_ref().unwrap().expose_secret(),
            "env-key"
        );
    }

    #[test]
    fn plain_api_key_variable_is_a_fallback() {
        let config =
            AppConfig::load_from(empty_file(), vars(&[("GEOCODING_API_KEY", "plain-key")]))
                .unwrap();
        assert_eq!(
            config.geocoding.api_key.as_ref().unwrap().expose_secret(),
            "plain-key"
        );
    }

    #[test]
    fn prefixed_key_wins_over_plain_variable() {
        let config = AppConfig::load_from(
            empty_file(),
            vars(&[
                ("GEOCODING_API_KEY", "plain-key"),
                ("TAXIFARE_GEOCODING__API_KEY", "prefixed-key"),
            ]),
        )
        .unwrap();
        assert_eq!(
            config.geocoding.api_key.as_ref().unwrap().expose_secret(),
            "prefixed-key"
        );
    }

    #[test]
    fn blank_plain_key_is_ignored() {
        let config =
            AppConfig::load_from(empty_file(), vars(&[("GEOCODING_API_KEY", "  ")])).unwrap();
        assert!(!config.geocoding.has_api_key());
    }

    #[test]
    fn validation_reports_section() {
        let mut config = AppConfig::default();
        config.prediction.base_url = String::new();
        assert!(config.validate().unwrap_err().starts_with("prediction:"));

        let mut config = AppConfig::default();
        config.health.global_timeout_secs = 0;
        assert!(config.validate().unwrap_err().starts_with("health:"));
    }

    #[test]
    fn debug_output_hides_key() {
        let config = AppConfig::load_from(
            empty_file(),
            vars(&[("TAXIFARE_GEOCODING__API_KEY", "hunter2")]),
        )
        .unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
