//! Pickup and dropoff location handlers
//!
//! Four ways to change a slot: free-text search, a chosen suggestion, typed
//! coordinates and a map click (the last two share one endpoint). Every
//! successful change answers with the full session so the page can move its
//! markers and recenter the map.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use domain::{Location, LocationSlot};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use super::common::{LocationResponse, SessionResponse, SessionScope};
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<LocationResponse>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SelectRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[validate(length(min = 1, max = 500, message = "must be between 1 and 500 characters"))]
    pub label: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CoordinatesRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
}

/// `POST /v1/locations/{slot}/search`
///
/// On failure the slot keeps its previous location. The lookup can take a
/// while, so the result is applied to the session as stored afterwards and
/// edits made to the other slot in the meantime survive.
#[instrument(skip(state, scope, body), fields(session = %scope.session.id))]
pub async fn search_location(
    State(state): State<AppState>,
    Path(slot): Path<LocationSlot>,
    scope: SessionScope,
    ValidatedJson(body): ValidatedJson<SearchRequest>,
) -> Response {
    let result = async {
        let location = state.resolver.resolve_address(&body.text).await?;
        let session = state
            .session_service
            .apply_resolved(scope.id(), slot, location, &body.text)
            .await?;
        Ok::<_, ApiError>(SessionResponse::from(&session))
    }
    .await;
    scope.reply(result)
}

/// `GET /v1/locations/suggest?q=`
///
/// Always 200; lookup problems just mean no suggestions.
pub async fn suggest_locations(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    let suggestions = state
        .resolver
        .suggest(&query.q)
        .await
        .iter()
        .map(LocationResponse::from)
        .collect();
    Json(SuggestResponse { suggestions })
}

/// `POST /v1/locations/{slot}/select`
#[instrument(skip(state, scope, body), fields(session = %scope.session.id))]
pub async fn select_location(
    State(state): State<AppState>,
    Path(slot): Path<LocationSlot>,
    scope: SessionScope,
    ValidatedJson(body): ValidatedJson<SelectRequest>,
) -> Response {
    let result = async {
        let location = Location::new(body.latitude, body.longitude, body.label)?;
        let session = state
            .session_service
            .select_location(scope.id(), slot, location)
            .await?;
        Ok::<_, ApiError>(SessionResponse::from(&session))
    }
    .await;
    scope.reply(result)
}

/// `PUT /v1/locations/{slot}/coordinates`
///
/// Manual entry and map clicks. Points outside the service area are
/// rejected with 400 and the session is not changed.
#[instrument(skip(state, scope, body), fields(session = %scope.session.id))]
pub async fn set_coordinates(
    State(state): State<AppState>,
    Path(slot): Path<LocationSlot>,
    scope: SessionScope,
    ValidatedJson(body): ValidatedJson<CoordinatesRequest>,
) -> Response {
    let result = state
        .session_service
        .set_coordinates(scope.id(), slot, body.latitude, body.longitude)
        .await
        .map(|session| SessionResponse::from(&session))
        .map_err(ApiError::from);
    scope.reply(result)
}
