//! Geocoding error types

use thiserror::Error;

/// Errors that can occur while talking to the geocoding provider
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// The provider answered with a non-success status
    #[error("Geocoding request failed: HTTP {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
    },

    /// The provider rejected the API key
    #[error("Geocoding API key rejected (HTTP {status})")]
    Unauthorized {
        /// HTTP status code (401 or 403)
        status: u16,
    },

    /// Failed to parse the provider's response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// No API key configured
    #[error("Geocoding API key not configured")]
    MissingApiKey,

    /// Request timeout
    #[error("Geocoding request timed out after {timeout_ms} ms")]
    Timeout {
        /// The deadline that passed, in milliseconds
        timeout_ms: u128,
    },
}

impl GeocodingError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::RequestFailed { status } => *status >= 500 || *status == 429,
            Self::Unauthorized { .. } | Self::ParseError(_) | Self::MissingApiKey => false,
        }
    }
}
