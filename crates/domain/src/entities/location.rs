//! A labelled point inside the service area

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{GeoLocation, ServiceArea};

/// Coordinates plus a human-readable label
///
/// A `Location` can only be built inside [`ServiceArea::NEW_YORK_CITY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    latitude: f64,
    longitude: f64,
    label: String,
}

impl Location {
    /// Create a location, rejecting anything outside the service area
    ///
    /// # Errors
    ///
    /// `InvalidCoordinates` for values outside the world range (or NaN),
    /// `OutsideServiceArea` for valid coordinates outside the box.
    pub fn new(latitude: f64, longitude: f64, label: impl Into<String>) -> Result<Self, DomainError> {
        let point = GeoLocation::new(latitude, longitude).map_err(|_| {
            DomainError::InvalidCoordinates {
                latitude,
                longitude,
            }
        })?;
        if !ServiceArea::NEW_YORK_CITY.contains(&point) {
            return Err(DomainError::outside_service_area(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            label: label.into(),
        })
    }

    /// Create a location whose label is its own formatted coordinates
    ///
    /// Used for manual entry and map clicks.
    ///
    /// # Errors
    ///
    /// Same as [`Location::new`].
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let label = GeoLocation::new_unchecked(latitude, longitude).to_string();
        Self::new(latitude, longitude, label)
    }

    pub(crate) fn trusted(point: GeoLocation, label: &str) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
            label: label.to_string(),
        }
    }

    /// Latitude in degrees
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The bare coordinates
    #[must_use]
    pub const fn point(&self) -> GeoLocation {
        GeoLocation::new_unchecked(self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    label: String,
}

impl TryFrom<RawLocation> for Location {
    type Error = DomainError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude, raw.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_square_is_accepted() {
        let loc = Location::new(40.7580, -73.9855, "Times Square, Manhattan").unwrap();
        assert!((loc.latitude() - 40.7580).abs() < f64::EPSILON);
        assert!((loc.longitude() - -73.9855).abs() < f64::EPSILON);
        assert_eq!(loc.label(), "Times Square, Manhattan");
    }

    #[test]
    fn out_of_area_is_rejected() {
        let err = Location::new(42.0, -73.95, "Albany-ish").unwrap_err();
        assert_eq!(err, DomainError::outside_service_area(42.0, -73.95));
    }

    #[test]
    fn invalid_world_coordinates_are_rejected() {
        assert!(matches!(
            Location::new(95.0, -73.95, "nowhere"),
            Err(DomainError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            Location::new(f64::NAN, -73.95, "nowhere"),
            Err(DomainError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn from_coordinates_labels_with_coordinates() {
        let loc = Location::from_coordinates(40.758, -73.9855).unwrap();
        assert_eq!(loc.label(), "40.75800, -73.98550");
    }

    #[test]
    fn deserialize_enforces_service_area() {
        let ok: Location =
            serde_json::from_str(r#"{"latitude": 40.7, "longitude": -74.0, "label": "x"}"#)
                .unwrap();
        assert_eq!(ok.label(), "x");

        let bad = serde_json::from_str::<Location>(r#"{"latitude": 48.85, "longitude": 2.35}"#);
        assert!(bad.is_err());
    }
}
