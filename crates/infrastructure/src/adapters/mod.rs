//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod fare_prediction_adapter;
mod geocoding_adapter;

pub use fare_prediction_adapter::FarePredictionAdapter;
pub use geocoding_adapter::GeocodingAdapter;
