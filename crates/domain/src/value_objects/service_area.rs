//! Serviceable area for pickups and dropoffs

use serde::Serialize;

use super::GeoLocation;

/// An inclusive latitude/longitude bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceArea {
    /// Southern edge in degrees
    pub min_latitude: f64,
    /// Northern edge in degrees
    pub max_latitude: f64,
    /// Western edge in degrees
    pub min_longitude: f64,
    /// Eastern edge in degrees
    pub max_longitude: f64,
}

impl ServiceArea {
    /// The New York City area the fare model was trained on
    pub const NEW_YORK_CITY: Self = Self {
        min_latitude: 40.5,
        max_latitude: 41.0,
        min_longitude: -74.3,
        max_longitude: -73.7,
    };

    /// Whether the raw coordinates lie inside the box (edges included)
    #[must_use]
    pub fn contains_coordinates(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }

    /// Whether the location lies inside the box
    #[must_use]
    pub fn contains(&self, location: &GeoLocation) -> bool {
        self.contains_coordinates(location.latitude(), location.longitude())
    }

    /// Center of the box
    #[must_use]
    pub fn center(&self) -> GeoLocation {
        GeoLocation::new_unchecked(
            f64::midpoint(self.min_latitude, self.max_latitude),
            f64::midpoint(self.min_longitude, self.max_longitude),
        )
    }
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self::NEW_YORK_CITY
    }
}
