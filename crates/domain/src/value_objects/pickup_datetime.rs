//! Pickup timestamp value object

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

/// A naive local pickup timestamp
///
/// The prediction service expects `YYYY-MM-DD HH:MM:SS` without a timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PickupDateTime(NaiveDateTime);

impl PickupDateTime {
    /// Wire format used by the prediction service
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Wrap an existing timestamp
    #[must_use]
    pub const fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Parse the wire format
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if the string does not match.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        NaiveDateTime::parse_from_str(value.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|e| DomainError::InvalidDateTime(format!("{value}: {e}")))
    }

    /// Combine a `YYYY-MM-DD` date with an `HH:MM` or `HH:MM:SS` time
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if either part is malformed.
    pub fn from_date_and_time(date: &str, time: &str) -> Result<Self, DomainError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| DomainError::InvalidDateTime(format!("{date}: {e}")))?;
        let time = time.trim();
        let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
            .map_err(|e| DomainError::InvalidDateTime(format!("{time}: {e}")))?;
        Ok(Self(date.and_time(time)))
    }

    /// Underlying timestamp
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Date part as `YYYY-MM-DD`
    #[must_use]
    pub fn date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Time part as `HH:MM`
    #[must_use]
    pub fn time_string(&self) -> String {
        self.0.format("%H:%M").to_string()
    }
}

impl Default for PickupDateTime {
    /// 2013-07-06 17:18:00, a timestamp inside the model's training window
    fn default() -> Self {
        let date = NaiveDate::from_ymd_opt(2013, 7, 6).unwrap_or_default();
        let time = NaiveTime::from_hms_opt(17, 18, 0).unwrap_or_default();
        Self(date.and_time(time))
    }
}

impl fmt::Display for PickupDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for PickupDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PickupDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
