//! Logging and distributed tracing
//!
//! Console logging through `tracing-subscriber`, with optional OTLP trace
//! export to Tempo/Jaeger.

mod otel;

pub use otel::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
