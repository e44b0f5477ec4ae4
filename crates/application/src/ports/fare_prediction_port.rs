//! Fare prediction service port

use async_trait::async_trait;
use domain::FareRequest;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the remote fare prediction model
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FarePredictionPort: Send + Sync {
    /// Send one prediction request and return the decoded JSON body as-is
    ///
    /// Interpreting the body is left to the caller. Errors:
    /// `ApplicationError::Timeout` when the configured deadline passes,
    /// `ApplicationError::ExternalService` for connection failures,
    /// non-success statuses and non-JSON bodies.
    async fn predict(&self, request: &FareRequest) -> Result<serde_json::Value, ApplicationError>;

    /// Check if the prediction service answers at all
    async fn is_available(&self) -> bool;
}
