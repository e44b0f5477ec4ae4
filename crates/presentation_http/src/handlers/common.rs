//! Session cookie handling and response bodies shared by the handlers

use axum::{
    Json,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domain::{GeoLocation, Location, SessionId, TripSession};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

/// The caller's trip session as stored when the request arrived
///
/// Extraction never writes to the store. A request without a usable cookie
/// gets a fresh ID, and responses built through [`SessionScope::reply`] then
/// carry the cookie. Handlers that change the session go through the
/// session service by ID instead of saving this snapshot.
#[derive(Debug)]
pub struct SessionScope {
    pub jar: CookieJar,
    pub session: TripSession,
}

impl FromRequestParts<AppState> for SessionScope {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let requested = jar
            .get(&state.cookie_name)
            .and_then(|cookie| SessionId::parse(cookie.value()).ok());

        let session = state.session_service.load_or_default(requested).await?;
        let jar = if requested == Some(session.id) {
            jar
        } else {
            jar.add(session_cookie(&state.cookie_name, session.id))
        };

        Ok(Self { jar, session })
    }
}

impl SessionScope {
    /// Session ID to pass to the session service
    pub const fn id(&self) -> SessionId {
        self.session.id
    }

    /// JSON success or error body, with the session cookie attached either way
    pub fn reply<T: Serialize>(self, result: Result<T, ApiError>) -> Response {
        (self.jar, result.map(Json)).into_response()
    }
}

/// Cookie binding the browser to its session
pub fn session_cookie(name: &str, id: SessionId) -> Cookie<'static> {
    Cookie::build((name.to_string(), id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// A point as sent to the browser
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointResponse {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeoLocation> for PointResponse {
    fn from(point: GeoLocation) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
        }
    }
}

/// A labelled location as sent to the browser
///
/// The same shape is accepted back by the select endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
            label: location.label().to_string(),
        }
    }
}

/// Full session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub pickup: LocationResponse,
    pub dropoff: LocationResponse,
    pub pickup_query: String,
    pub dropoff_query: String,
    pub map_center: PointResponse,
    pub distance_km: f64,
}

impl From<&TripSession> for SessionResponse {
    fn from(session: &TripSession) -> Self {
        Self {
            session_id: session.id.to_string(),
            pickup: (&session.pickup).into(),
            dropoff: (&session.dropoff).into(),
            pickup_query: session.pickup_query.clone(),
            dropoff_query: session.dropoff_query.clone(),
            map_center: session.map_center().into(),
            distance_km: session.distance_km(),
        }
    }
}
