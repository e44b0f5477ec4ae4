//! Fare prediction adapter - Implements FarePredictionPort using integration_prediction

use application::error::ApplicationError;
use application::ports::FarePredictionPort;
use async_trait::async_trait;
use domain::FareRequest;
use integration_prediction::{PredictionClient, PredictionConfig, PredictionError, TaxiFareClient};
use serde_json::Value;
use tracing::{debug, instrument};

/// Adapter for the remote taxi fare model
pub struct FarePredictionAdapter {
    client: TaxiFareClient,
}

impl std::fmt::Debug for FarePredictionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FarePredictionAdapter")
            .field("client", &"TaxiFareClient")
            .finish()
    }
}

impl FarePredictionAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: PredictionConfig) -> Result<Self, ApplicationError> {
        let client =
            TaxiFareClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration prediction error to application error
    fn map_error(err: PredictionError) -> ApplicationError {
        match err {
            PredictionError::Timeout { .. } => ApplicationError::Timeout(err.to_string()),
            PredictionError::ConnectionFailed(_)
            | PredictionError::HttpStatus { .. }
            | PredictionError::ParseError(_) => ApplicationError::ExternalService(err.to_string()),
        }
    }
}

#[async_trait]
impl FarePredictionPort for FarePredictionAdapter {
    #[instrument(skip(self, request), fields(passengers = request.passenger_count.value()))]
    async fn predict(&self, request: &FareRequest) -> Result<Value, ApplicationError> {
        let result = self.client.predict(request).await.map_err(Self::map_error);

        if let Err(e) = &result {
            debug!(error = %e, "Fare prediction failed");
        }

        result
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_adapter() {
        assert!(FarePredictionAdapter::new(PredictionConfig::default()).is_ok());
    }

    #[test]
    fn map_error_timeout() {
        let err = FarePredictionAdapter::map_error(PredictionError::Timeout { timeout_secs: 10 });
        assert!(matches!(err, ApplicationError::Timeout(_)));
    }

    #[test]
    fn map_error_status_keeps_body() {
        let err = FarePredictionAdapter::map_error(PredictionError::HttpStatus {
            status: 500,
            body: "Internal Server Error".to_string(),
        });
        match err {
            ApplicationError::ExternalService(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("Internal Server Error"));
            },
            other => panic!("expected ExternalService, got {other:?}"),
        }
    }

    #[test]
    fn map_error_parse() {
        let err = FarePredictionAdapter::map_error(PredictionError::ParseError("eof".into()));
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn debug_impl() {
        let adapter = FarePredictionAdapter::new(PredictionConfig::default()).unwrap();
        assert!(format!("{adapter:?}").contains("FarePredictionAdapter"));
    }
}
