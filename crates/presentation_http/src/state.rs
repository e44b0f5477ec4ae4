//! Application state shared across handlers

use std::sync::Arc;

use application::{FareService, HealthService, LocationResolver, SessionService};

use crate::page::PageRenderer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Address search and autocomplete
    pub resolver: Arc<LocationResolver>,
    /// Fare predictions
    pub fare_service: Arc<FareService>,
    /// Per-browser trip sessions
    pub session_service: Arc<SessionService>,
    /// Provider probes for `/ready`
    pub health_service: Arc<HealthService>,
    /// HTML page
    pub pages: Arc<PageRenderer>,
    /// Name of the session cookie
    pub cookie_name: Arc<str>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}
