//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service did not answer within its deadline
    #[error("External service timed out: {0}")]
    Timeout(String),

    /// External service error (unreachable, bad status, malformed body)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::ExternalService(_))
    }
}

/// Why an address could not be turned into a location
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Fewer than two characters after trimming; nothing was sent
    #[error("Address text is too short")]
    InputTooShort,

    /// The geocoding provider did not answer in time
    #[error("Geocoding timed out")]
    Timeout,

    /// The geocoding provider could not be reached or answered garbage
    #[error("Geocoding service unreachable: {0}")]
    Unreachable(String),

    /// No in-area candidate for any query, or no provider credential
    #[error("Address not found in the service area")]
    NoMatch,
}

impl ResolveError {
    /// Message shown next to the address field
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InputTooShort => "Please enter at least 2 characters.",
            Self::Timeout => "Geocoding timed out. Please try again.",
            Self::Unreachable(_) => {
                "Cannot connect to geocoding service. Please try again later."
            },
            Self::NoMatch => "Address not found. Try a different query.",
        }
    }

    /// Stable machine-readable code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InputTooShort => "INPUT_TOO_SHORT",
            Self::Timeout => "GEOCODE_TIMEOUT",
            Self::Unreachable(_) => "GEOCODE_UNREACHABLE",
            Self::NoMatch => "GEOCODE_NO_MATCH",
        }
    }
}

/// Why a fare could not be produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FareError {
    /// The prediction service did not answer in time
    #[error("Fare prediction timed out")]
    Timeout,

    /// Connection refused, non-success status, or a body that is not JSON
    #[error("Fare prediction request failed: {0}")]
    Transport(String),

    /// A JSON body with neither a numeric `fare` nor a numeric `fare_amount`
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(serde_json::Value),
}

impl FareError {
    /// Message shown in place of the fare
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout => "API request failed: the prediction service timed out.".to_string(),
            Self::Transport(cause) => format!("API request failed: {cause}"),
            Self::UnexpectedResponse(body) => format!("Unexpected response: {body}"),
        }
    }

    /// Stable machine-readable code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Timeout => "PREDICTION_TIMEOUT",
            Self::Transport(_) => "PREDICTION_TRANSPORT_ERROR",
            Self::UnexpectedResponse(_) => "PREDICTION_UNEXPECTED_RESPONSE",
        }
    }
}
