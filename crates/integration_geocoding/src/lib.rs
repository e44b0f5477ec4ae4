//! Geocoding integration for TaxiFare
//!
//! Forward geocoding through [geocode.maps.co](https://geocode.maps.co), a
//! hosted Nominatim-compatible API that requires an API key.
//!
//! # Architecture
//!
//! [`GeocodingClient`] defines the interface, implemented by
//! [`MapsCoGeocodingClient`]. The client performs no filtering: restricting
//! matches to the service area is the caller's job.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{GeocodingClient, GeocodingConfig, MapsCoGeocodingClient};
//!
//! let config = GeocodingConfig {
//!     api_key: Some("...".into()),
//!     ..GeocodingConfig::default()
//! };
//! let client = MapsCoGeocodingClient::new(config)?;
//! let places = client.search("Times Square, New York City", None).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GeocodingClient, MapsCoGeocodingClient};
pub use config::GeocodingConfig;
pub use error::GeocodingError;
pub use models::Place;
