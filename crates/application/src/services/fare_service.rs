//! Fare request orchestration
//!
//! Sends a completed [`FareRequest`] to the prediction port and interprets
//! the answer. One call per request, no retries.

use std::sync::Arc;

use domain::{FareQuote, FareRequest, FareSource, PassengerCount, PickupDateTime, TripSession};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::error::{ApplicationError, FareError};
use crate::ports::FarePredictionPort;

/// The fare value found in a prediction response
///
/// The service has answered with either key over time. `fare` is preferred;
/// a `fare` that is present but not a number is ignored in favor of
/// `fare_amount`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FareField {
    /// Numeric `fare`
    Fare(f64),
    /// Numeric `fare_amount`
    FareAmount(f64),
}

impl FareField {
    /// Pick the fare out of a JSON body, if any numeric key is present
    pub fn decode(body: &Value) -> Option<Self> {
        let number = |key: &str| body.get(key).and_then(Value::as_f64).filter(|v| v.is_finite());
        number("fare")
            .map(Self::Fare)
            .or_else(|| number("fare_amount").map(Self::FareAmount))
    }

    /// Rounded quote for this value
    pub fn into_quote(self) -> FareQuote {
        match self {
            Self::Fare(v) => FareQuote::new(v, FareSource::Fare),
            Self::FareAmount(v) => FareQuote::new(v, FareSource::FareAmount),
        }
    }
}

/// Application service producing fare quotes
pub struct FareService {
    predictor: Arc<dyn FarePredictionPort>,
}

impl std::fmt::Debug for FareService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FareService")
            .field("predictor", &"<FarePredictionPort>")
            .finish()
    }
}

impl FareService {
    /// Create a new fare service
    pub fn new(predictor: Arc<dyn FarePredictionPort>) -> Self {
        Self { predictor }
    }

    /// Ask the prediction service for a fare
    #[instrument(skip(self, request), fields(passengers = %request.passenger_count, at = %request.pickup_datetime))]
    pub async fn request_fare(&self, request: &FareRequest) -> Result<FareQuote, FareError> {
        let body = self.predictor.predict(request).await.map_err(|e| match e {
            ApplicationError::Timeout(reason) => {
                warn!(%reason, "Fare prediction timed out");
                FareError::Timeout
            },
            other => {
                warn!(error = %other, "Fare prediction failed");
                FareError::Transport(other.to_string())
            },
        })?;

        let Some(field) = FareField::decode(&body) else {
            warn!(%body, "Prediction response has no numeric fare");
            return Err(FareError::UnexpectedResponse(body));
        };

        let quote = field.into_quote();
        info!(fare = quote.fare, source = ?quote.source, "Fare predicted");
        Ok(quote)
    }

    /// Build a request from the session's current locations and send it
    pub async fn quote_session(
        &self,
        session: &TripSession,
        passenger_count: PassengerCount,
        pickup_datetime: PickupDateTime,
    ) -> Result<FareQuote, FareError> {
        let request = FareRequest::from_session(session, passenger_count, pickup_datetime);
        self.request_fare(&request).await
    }

    /// Whether the prediction service answers
    pub async fn is_available(&self) -> bool {
        self.predictor.is_available().await
    }
}
