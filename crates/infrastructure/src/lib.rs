//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the geocoding and
//! fare prediction adapters, the in-memory session store, configuration
//! loading and telemetry setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use cache::{MokaSessionStore, SessionStoreConfig};
pub use config::{
    AppConfig, GeocodingAppConfig, HealthAppConfig, PredictionAppConfig, ServerConfig,
    SessionAppConfig, TelemetryAppConfig,
};
pub use telemetry::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
