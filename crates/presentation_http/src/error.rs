//! API error handling
//!
//! Every failure becomes an [`ErrorResponse`] body with a human-readable
//! `error`, a stable `code` and optional `details`. Resolver and fare errors
//! keep their own codes and messages so the page can show them verbatim.

use application::{ApplicationError, FareError, ResolveError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Fare(#[from] FareError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)
            | Self::Resolve(ResolveError::InputTooShort) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Resolve(ResolveError::NoMatch) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Resolve(ResolveError::Timeout) | Self::Fare(FareError::Timeout) => {
                StatusCode::GATEWAY_TIMEOUT
            },
            Self::Resolve(ResolveError::Unreachable(_))
            | Self::Fare(FareError::Transport(_) | FareError::UnexpectedResponse(_)) => {
                StatusCode::BAD_GATEWAY
            },
        }
    }

    fn body(&self) -> ErrorResponse {
        let (error, code, details) = match self {
            Self::BadRequest(msg) => (msg.clone(), "bad_request", None),
            Self::NotFound(msg) => (msg.clone(), "not_found", None),
            Self::ServiceUnavailable(msg) => (msg.clone(), "service_unavailable", None),
            Self::Internal(_) => (
                "An internal error occurred".to_string(),
                "internal_error",
                None,
            ),
            Self::Resolve(e) => {
                let details = match e {
                    ResolveError::Unreachable(cause) => Some(Value::String(cause.clone())),
                    _ => None,
                };
                (e.user_message().to_string(), e.code(), details)
            },
            Self::Fare(e) => {
                let details = match e {
                    FareError::UnexpectedResponse(body) => Some(body.clone()),
                    FareError::Transport(cause) => Some(Value::String(cause.clone())),
                    FareError::Timeout => None,
                };
                (e.user_message().to_string(), e.code(), details)
            },
        };

        ErrorResponse {
            error,
            code: code.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(%status, error = %self, "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => e.into(),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Timeout(msg) | ApplicationError::ExternalService(msg) => {
                Self::ServiceUnavailable(msg)
            },
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
