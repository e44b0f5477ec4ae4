//! Fare request and fare quote

use serde::{Deserialize, Serialize};

use super::{Location, TripSession};
use crate::value_objects::{PassengerCount, PickupDateTime};

/// Everything the prediction service needs for one quote
///
/// Built fresh from the session on every submission and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareRequest {
    /// Where the ride starts
    pub pickup: Location,
    /// Where the ride ends
    pub dropoff: Location,
    /// Number of passengers
    pub passenger_count: PassengerCount,
    /// Local pickup time
    pub pickup_datetime: PickupDateTime,
}

impl FareRequest {
    /// Create a request from explicit parts
    pub const fn new(
        pickup: Location,
        dropoff: Location,
        passenger_count: PassengerCount,
        pickup_datetime: PickupDateTime,
    ) -> Self {
        Self {
            pickup,
            dropoff,
            passenger_count,
            pickup_datetime,
        }
    }

    /// Snapshot the session's current locations
    pub fn from_session(
        session: &TripSession,
        passenger_count: PassengerCount,
        pickup_datetime: PickupDateTime,
    ) -> Self {
        Self::new(
            session.pickup.clone(),
            session.dropoff.clone(),
            passenger_count,
            pickup_datetime,
        )
    }

    /// Query parameters in the order the prediction service documents them
    pub fn query_pairs(&self) -> [(&'static str, String); 6] {
        [
            ("pickup_datetime", self.pickup_datetime.to_string()),
            ("pickup_longitude", self.pickup.longitude().to_string()),
            ("pickup_latitude", self.pickup.latitude().to_string()),
            ("dropoff_longitude", self.dropoff.longitude().to_string()),
            ("dropoff_latitude", self.dropoff.latitude().to_string()),
            ("passenger_count", self.passenger_count.to_string()),
        ]
    }
}

/// Which response key the fare was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FareSource {
    /// The `fare` key
    Fare,
    /// The `fare_amount` key
    FareAmount,
}

/// A predicted fare in dollars, rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    /// Fare rounded to two decimals
    pub fare: f64,
    /// Response key the value came from
    pub source: FareSource,
}

impl FareQuote {
    /// Round a raw fare to two decimals
    pub fn new(raw_fare: f64, source: FareSource) -> Self {
        Self {
            fare: round_to_cents(raw_fare),
            source,
        }
    }

    /// `$12.35`
    pub fn display_amount(&self) -> String {
        format!("${:.2}", self.fare)
    }
}

/// Rounds the exact stored value, so `2.675` (held as 2.67499...) gives 2.67
fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
