//! HTML page handler

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use super::common::SessionScope;
use crate::{error::ApiError, state::AppState};

/// `GET /`
pub async fn index(State(state): State<AppState>, scope: SessionScope) -> Response {
    match state.pages.render_index(&scope.session) {
        Ok(html) => (scope.jar, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render page");
            (scope.jar, ApiError::Internal(e.to_string())).into_response()
        },
    }
}
