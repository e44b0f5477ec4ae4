//! Fare prediction HTTP client

use std::time::Duration;

use async_trait::async_trait;
use domain::FareRequest;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::PredictionConfig;
use crate::error::PredictionError;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Trait for fare prediction clients
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Request a prediction and return the JSON body undecoded
    async fn predict(&self, request: &FareRequest) -> Result<Value, PredictionError>;

    /// Check whether the service answers at its base URL
    async fn is_healthy(&self) -> bool;
}

/// HTTP client for the fare prediction service
#[derive(Debug)]
pub struct TaxiFareClient {
    client: Client,
    config: PredictionConfig,
}

impl TaxiFareClient {
    /// Create a new prediction client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: PredictionConfig) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PredictionError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, PredictionError> {
        Self::new(PredictionConfig::default())
    }

    fn map_send_error(&self, e: &reqwest::Error) -> PredictionError {
        if e.is_timeout() {
            PredictionError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            PredictionError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl PredictionClient for TaxiFareClient {
    #[instrument(skip(self, request))]
    async fn predict(&self, request: &FareRequest) -> Result<Value, PredictionError> {
        let params = request.query_pairs();
        debug!(?params, "Requesting fare prediction");

        let response = self
            .client
            .get(self.config.predict_url())
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PredictionError::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(&e))?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| PredictionError::ParseError(e.to_string()))?;

        debug!(%value, "Prediction response");
        Ok(value)
    }

    #[instrument(skip(self))]
    async fn is_healthy(&self) -> bool {
        match self.client.get(&self.config.base_url).send().await {
            Ok(response) => !response.status().is_server_error(),
            Err(e) => {
                debug!(error = %e, "Prediction service health probe failed");
                false
            },
        }
    }
}
