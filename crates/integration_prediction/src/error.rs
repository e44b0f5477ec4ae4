//! Prediction error types

use thiserror::Error;

/// Errors that can occur while requesting a prediction
#[derive(Debug, Error)]
pub enum PredictionError {
    /// Connection to the prediction service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// First part of the response body, for diagnostics
        body: String,
    },

    /// The body was not JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl PredictionError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            Self::ParseError(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(PredictionError::ConnectionFailed("refused".to_string()).is_retryable());
        assert!(PredictionError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(
            PredictionError::HttpStatus {
                status: 502,
                body: String::new()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!PredictionError::ParseError("eof".to_string()).is_retryable());
        assert!(
            !PredictionError::HttpStatus {
                status: 422,
                body: "validation".to_string()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = PredictionError::HttpStatus {
            status: 500,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert!(
            PredictionError::Timeout { timeout_secs: 10 }
                .to_string()
                .contains("10")
        );
    }
}
