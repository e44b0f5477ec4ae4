//! Passenger count value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Number of passengers in a single taxi ride (1 to 8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PassengerCount(u8);

impl PassengerCount {
    /// Smallest accepted count
    pub const MIN: u8 = 1;
    /// Largest accepted count
    pub const MAX: u8 = 8;
    /// Count preselected in the form
    pub const DEFAULT: u8 = 2;

    /// Create a passenger count
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPassengerCount` outside 1..=8.
    pub fn new(count: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(DomainError::InvalidPassengerCount(count))
        }
    }

    /// Raw count
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for PassengerCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u8> for PassengerCount {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PassengerCount> for u8 {
    fn from(count: PassengerCount) -> Self {
        count.0
    }
}

impl fmt::Display for PassengerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
