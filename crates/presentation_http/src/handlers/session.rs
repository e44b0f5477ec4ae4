//! Session state handlers

use axum::{extract::State, response::Response};

use super::common::{SessionResponse, SessionScope};
use crate::state::AppState;

/// `GET /v1/session`
pub async fn get_session(scope: SessionScope) -> Response {
    let body = SessionResponse::from(&scope.session);
    scope.reply(Ok(body))
}

/// `DELETE /v1/session`
///
/// Puts both locations back to their defaults; the session ID is kept.
pub async fn reset_session(State(state): State<AppState>, scope: SessionScope) -> Response {
    let result = state
        .session_service
        .reset(scope.id())
        .await
        .map(|session| SessionResponse::from(&session))
        .map_err(Into::into);
    scope.reply(result)
}
