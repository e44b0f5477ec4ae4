//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod fare_prediction_port;
mod geocoding_port;
mod session_store;

#[cfg(test)]
pub use fare_prediction_port::MockFarePredictionPort;
pub use fare_prediction_port::FarePredictionPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodeCandidate, GeocodingPort};
#[cfg(test)]
pub use session_store::MockSessionStorePort;
pub use session_store::SessionStorePort;
