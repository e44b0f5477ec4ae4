//! Provider response models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One search match, with coordinates already parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Provider's full name for the match
    pub display_name: Option<String>,
}

/// Raw entry of the `/search` array
///
/// Nominatim sends coordinates as strings; some mirrors send numbers.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPlace {
    #[serde(default)]
    lat: Value,
    #[serde(default)]
    lon: Value,
    #[serde(default)]
    display_name: Option<String>,
}

impl RawPlace {
    /// Parse coordinates, returning `None` if either is not a number
    pub(crate) fn into_place(self) -> Option<Place> {
        Some(Place {
            lat: coordinate(&self.lat)?,
            lon: coordinate(&self.lon)?,
            display_name: self.display_name,
        })
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    }?;
    parsed.is_finite().then_some(parsed)
}
