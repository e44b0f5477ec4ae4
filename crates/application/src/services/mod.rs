//! Application services - Use case implementations

mod fare_service;
mod health_service;
mod location_resolver;
mod session_service;

pub use fare_service::{FareField, FareService};
pub use health_service::{HealthConfig, HealthReport, HealthService, ServiceHealth};
pub use location_resolver::{
    LocationResolver, MIN_RESOLVE_CHARS, MIN_SUGGEST_CHARS, QUERY_LADDER, QueryReformulation,
    ResolverConfig, SUGGEST_QUERY,
};
pub use session_service::SessionService;
