//! Trip session storage configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::SessionStoreConfig;

/// Per-browser session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAppConfig {
    /// Minutes of inactivity before a session is evicted
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_minutes: u64,

    /// Upper bound on sessions held in memory
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,

    /// Name of the cookie carrying the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

const fn default_idle_timeout() -> u64 {
    60
}

const fn default_max_sessions() -> u64 {
    10_000
}

fn default_cookie_name() -> String {
    "taxifare_session".to_string()
}

impl Default for SessionAppConfig {
    fn default() -> Self {
        Self {
            idle_timeout_minutes: default_idle_timeout(),
            max_sessions: default_max_sessions(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl SessionAppConfig {
    /// Convert to the session store settings
    #[must_use]
    pub const fn to_store_config(&self) -> SessionStoreConfig {
        SessionStoreConfig {
            max_sessions: self.max_sessions,
            time_to_idle: Duration::from_secs(self.idle_timeout_minutes * 60),
        }
    }

    pub(super) fn validate(&self) -> Result<(), String> {
        if self.idle_timeout_minutes == 0 {
            return Err("session: idle_timeout_minutes must be greater than 0".to_string());
        }
        if self.max_sessions == 0 {
            return Err("session: max_sessions must be greater than 0".to_string());
        }
        let valid_cookie = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_cookie {
            return Err(format!(
                "session: cookie_name '{}' must be non-empty ASCII letters, digits, '_' or '-'",
                self.cookie_name
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionAppConfig::default();
        assert_eq!(config.idle_timeout_minutes, 60);
        assert_eq!(config.max_sessions, 10_000);
        assert_eq!(config.cookie_name, "taxifare_session");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn store_config_converts_minutes() {
        let store = SessionAppConfig {
            idle_timeout_minutes: 2,
            ..Default::default()
        }
        .to_store_config();
        assert_eq!(store.time_to_idle, Duration::from_secs(120));
        assert_eq!(store.max_sessions, 10_000);
    }

    #[test]
    fn rejects_bad_cookie_names() {
        for name in ["", "has space", "semi;colon", "quote\""] {
            let config = SessionAppConfig {
                cookie_name: name.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn rejects_zero_limits() {
        let config = SessionAppConfig {
            max_sessions: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = SessionAppConfig {
            idle_timeout_minutes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
