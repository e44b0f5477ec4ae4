//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Coordinates are outside the valid world range or not numbers
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Coordinates are valid but outside the serviceable area
    #[error(
        "Location {latitude}, {longitude} is outside the service area \
         (latitude 40.5 to 41.0, longitude -74.3 to -73.7)"
    )]
    OutsideServiceArea { latitude: f64, longitude: f64 },

    /// Passenger count outside 1..=8
    #[error("Invalid passenger count {0}: must be between 1 and 8")]
    InvalidPassengerCount(u8),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Date/time parsing error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

impl DomainError {
    /// Create an out-of-area error for the given coordinates
    pub const fn outside_service_area(latitude: f64, longitude: f64) -> Self {
        Self::OutsideServiceArea {
            latitude,
            longitude,
        }
    }
}
