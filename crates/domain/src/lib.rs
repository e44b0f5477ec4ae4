//! Domain layer for TaxiFare
//!
//! Contains the trip model: locations constrained to the New York City
//! service area, the per-session pickup/dropoff state, and fare requests.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
