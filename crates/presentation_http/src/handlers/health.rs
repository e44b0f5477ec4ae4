//! Health check handlers

use std::collections::HashMap;

use application::ServiceHealth;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub services: HashMap<String, ServiceHealth>,
    pub active_sessions: u64,
    pub checked_at: String,
}

/// Readiness check
///
/// Ready means fares can be predicted. A missing geocoding key is reported
/// but does not fail readiness: coordinates can still be entered by hand.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let report = state.health_service.check_all().await;
    let ready = report.ready;

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            services: report.services,
            active_sessions: state.session_service.active_sessions().await,
            checked_at: report.checked_at.to_rfc3339(),
        }),
    )
}
