//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Page
        .route("/", get(handlers::page::index))
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Session API (v1)
        .route(
            "/v1/session",
            get(handlers::session::get_session).delete(handlers::session::reset_session),
        )
        // Locations API (v1)
        .route(
            "/v1/locations/suggest",
            get(handlers::locations::suggest_locations),
        )
        .route(
            "/v1/locations/{slot}/search",
            post(handlers::locations::search_location),
        )
        .route(
            "/v1/locations/{slot}/select",
            post(handlers::locations::select_location),
        )
        .route(
            "/v1/locations/{slot}/coordinates",
            put(handlers::locations::set_coordinates),
        )
        // Fare API (v1)
        .route("/v1/fare", post(handlers::fare::quote_fare))
        .with_state(state)
}

/// Wrap the router in the server-wide layers
///
/// Outermost first: request ID, tracing, CORS (when enabled), body limit.
pub fn apply_middleware(router: Router, server: &ServerConfig) -> Router {
    let router = router.layer(DefaultBodyLimit::max(server.max_body_size_json_bytes));

    let router = if server.cors_enabled {
        router.layer(cors_layer(&server.allowed_origins))
    } else {
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
