//! Fare prediction handler

use axum::{extract::State, response::Response};
use domain::{DomainError, FareSource, PassengerCount, PickupDateTime};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use super::common::{LocationResponse, SessionScope};
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

const fn default_passenger_count() -> u8 {
    PassengerCount::DEFAULT
}

/// Fare form values
///
/// The pickup time is either one `pickup_datetime` (`YYYY-MM-DD HH:MM:SS`)
/// or a `pickup_date` plus `pickup_time` pair as the browser's date and time
/// inputs produce them. With neither, the form default is used.
#[derive(Debug, Deserialize, Validate)]
pub struct FareBody {
    #[serde(default = "default_passenger_count")]
    #[validate(range(min = 1, max = 8, message = "must be between 1 and 8"))]
    pub passenger_count: u8,
    #[serde(default)]
    pub pickup_datetime: Option<String>,
    #[serde(default)]
    pub pickup_date: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<String>,
}

impl FareBody {
    fn pickup_datetime(&self) -> Result<PickupDateTime, DomainError> {
        match (&self.pickup_datetime, &self.pickup_date, &self.pickup_time) {
            (Some(datetime), _, _) => PickupDateTime::parse(datetime),
            (None, Some(date), Some(time)) => PickupDateTime::from_date_and_time(date, time),
            (None, None, None) => Ok(PickupDateTime::default()),
            _ => Err(DomainError::InvalidDateTime(
                "pickup_date and pickup_time must be sent together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FareResponse {
    /// Fare in dollars, rounded to cents
    pub fare: f64,
    /// `$12.35`
    pub display: String,
    pub source: FareSource,
    pub passenger_count: u8,
    pub pickup_datetime: PickupDateTime,
    pub pickup: LocationResponse,
    pub dropoff: LocationResponse,
}

/// `POST /v1/fare`
///
/// Quotes the session's current pickup and dropoff.
#[instrument(skip(state, scope, body), fields(session = %scope.session.id))]
pub async fn quote_fare(
    State(state): State<AppState>,
    scope: SessionScope,
    ValidatedJson(body): ValidatedJson<FareBody>,
) -> Response {
    let result = async {
        let passenger_count = PassengerCount::new(body.passenger_count)?;
        let pickup_datetime = body.pickup_datetime()?;
        let quote = state
            .fare_service
            .quote_session(&scope.session, passenger_count, pickup_datetime)
            .await?;

        Ok::<_, ApiError>(FareResponse {
            fare: quote.fare,
            display: quote.display_amount(),
            source: quote.source,
            passenger_count: passenger_count.value(),
            pickup_datetime,
            pickup: (&scope.session.pickup).into(),
            dropoff: (&scope.session.dropoff).into(),
        })
    }
    .await;
    scope.reply(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(datetime: Option<&str>, date: Option<&str>, time: Option<&str>) -> FareBody {
        FareBody {
            passenger_count: 2,
            pickup_datetime: datetime.map(str::to_string),
            pickup_date: date.map(str::to_string),
            pickup_time: time.map(str::to_string),
        }
    }

    #[test]
    fn datetime_defaults_when_absent() {
        let parsed = body(None, None, None).pickup_datetime().unwrap();
        assert_eq!(parsed.to_string(), "2013-07-06 17:18:00");
    }

    #[test]
    fn single_datetime_wins() {
        let parsed = body(Some("2014-01-02 03:04:05"), Some("2020-01-01"), None)
            .pickup_datetime()
            .unwrap();
        assert_eq!(parsed.to_string(), "2014-01-02 03:04:05");
    }

    #[test]
    fn date_and_time_pair() {
        let parsed = body(None, Some("2013-07-06"), Some("09:30"))
            .pickup_datetime()
            .unwrap();
        assert_eq!(parsed.to_string(), "2013-07-06 09:30:00");
    }

    #[test]
    fn half_pair_is_rejected() {
        assert!(body(None, Some("2013-07-06"), None).pickup_datetime().is_err());
    }

    #[test]
    fn missing_passenger_count_defaults() {
        let parsed: FareBody = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.passenger_count, 2);
        assert!(parsed.validate().is_ok());
    }
}
