//! Trip session entity - the pickup/dropoff state of one browser session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;
use crate::errors::DomainError;
use crate::value_objects::{GeoLocation, LocationSlot, SessionId};

/// Per-session location state shared by address resolution and fare requests
///
/// Each of the two locations is always a complete, in-area [`Location`].
/// Every update replaces a location wholesale; no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSession {
    /// Unique session identifier
    pub id: SessionId,
    /// Where the ride starts
    pub pickup: Location,
    /// Where the ride ends
    pub dropoff: Location,
    /// Last address text submitted for the pickup
    #[serde(default)]
    pub pickup_query: String,
    /// Last address text submitted for the dropoff
    #[serde(default)]
    pub dropoff_query: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// When a location last changed
    pub updated_at: DateTime<Utc>,
}

impl TripSession {
    /// Create a session at the default pickup/dropoff pair
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    /// Create a default session under an existing ID
    pub fn with_id(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            pickup: Location::trusted(GeoLocation::default_pickup(), "Default pickup"),
            dropoff: Location::trusted(GeoLocation::default_dropoff(), "Default dropoff"),
            pickup_query: String::new(),
            dropoff_query: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Current location for a slot
    pub const fn location(&self, slot: LocationSlot) -> &Location {
        match slot {
            LocationSlot::Pickup => &self.pickup,
            LocationSlot::Dropoff => &self.dropoff,
        }
    }

    /// Last address text submitted for a slot
    pub fn query(&self, slot: LocationSlot) -> &str {
        match slot {
            LocationSlot::Pickup => &self.pickup_query,
            LocationSlot::Dropoff => &self.dropoff_query,
        }
    }

    /// Overwrite a slot's location
    pub fn replace(&mut self, slot: LocationSlot, location: Location) {
        match slot {
            LocationSlot::Pickup => self.pickup = location,
            LocationSlot::Dropoff => self.dropoff = location,
        }
        self.updated_at = Utc::now();
    }

    /// Overwrite a slot's location and remember the address text that produced it
    pub fn replace_from_query(
        &mut self,
        slot: LocationSlot,
        location: Location,
        query: impl Into<String>,
    ) {
        let query = query.into();
        match slot {
            LocationSlot::Pickup => self.pickup_query = query,
            LocationSlot::Dropoff => self.dropoff_query = query,
        }
        self.replace(slot, location);
    }

    /// Manual coordinate entry or map click
    ///
    /// # Errors
    ///
    /// Coordinates outside the service area are rejected and the session is
    /// left untouched.
    pub fn set_coordinates(
        &mut self,
        slot: LocationSlot,
        latitude: f64,
        longitude: f64,
    ) -> Result<&Location, DomainError> {
        let location = Location::from_coordinates(latitude, longitude)?;
        self.replace(slot, location);
        Ok(self.location(slot))
    }

    /// Point the map should be centered on
    pub fn map_center(&self) -> GeoLocation {
        self.pickup.point().midpoint(&self.dropoff.point())
    }

    /// Straight-line distance between pickup and dropoff
    pub fn distance_km(&self) -> f64 {
        self.pickup.point().distance_km(&self.dropoff.point())
    }
}

impl Default for TripSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_uses_default_locations() {
        let session = TripSession::new();
        assert!((session.pickup.latitude() - 40.783_282).abs() < f64::EPSILON);
        assert!((session.pickup.longitude() - -73.950_655).abs() < f64::EPSILON);
        assert!((session.dropoff.latitude() - 40.769_802).abs() < f64::EPSILON);
        assert!((session.dropoff.longitude() - -73.984_365).abs() < f64::EPSILON);
        assert!(session.pickup_query.is_empty());
    }

    #[test]
    fn replace_overwrites_whole_location() {
        let mut session = TripSession::new();
        let times_square = Location::new(40.7580, -73.9855, "Times Square, Manhattan").unwrap();
        session.replace_from_query(LocationSlot::Pickup, times_square.clone(), "Times Square");

        assert_eq!(session.location(LocationSlot::Pickup), &times_square);
        assert_eq!(session.query(LocationSlot::Pickup), "Times Square");
        // Dropoff untouched
        assert!((session.dropoff.latitude() - 40.769_802).abs() < f64::EPSILON);
        assert_eq!(session.query(LocationSlot::Dropoff), "");
    }

    #[test]
    fn set_coordinates_accepts_in_area() {
        let mut session = TripSession::new();
        let loc = session
            .set_coordinates(LocationSlot::Dropoff, 40.7, -74.0)
            .unwrap();
        assert_eq!(loc.label(), "40.70000, -74.00000");
        assert!((session.dropoff.latitude() - 40.7).abs() < f64::EPSILON);
    }

    #[test]
    fn set_coordinates_rejects_out_of_area_and_keeps_previous() {
        let mut session = TripSession::new();
        let before = session.pickup.clone();

        let err = session
            .set_coordinates(LocationSlot::Pickup, 42.0, -73.95)
            .unwrap_err();

        assert!(matches!(err, DomainError::OutsideServiceArea { .. }));
        assert_eq!(session.pickup, before);
    }

    #[test]
    fn map_center_is_midpoint() {
        let session = TripSession::new();
        let center = session.map_center();
        assert!((center.latitude() - (40.783_282 + 40.769_802) / 2.0).abs() < 1e-9);
        assert!((center.longitude() - (-73.950_655 + -73.984_365) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn replace_bumps_updated_at() {
        let mut session = TripSession::new();
        let before = session.updated_at;
        session.replace(
            LocationSlot::Dropoff,
            Location::from_coordinates(40.71, -74.01).unwrap(),
        );
        assert!(session.updated_at >= before);
    }
}
