//! Location resolver
//!
//! Turns free-text addresses into in-area [`Location`]s and produces
//! autocomplete suggestions. The resolver holds no session state: callers
//! pass the [`TripSession`] they want updated.

use std::sync::Arc;
use std::time::Duration;

use domain::{Location, LocationSlot, TripSession};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{ApplicationError, ResolveError};
use crate::ports::{GeocodeCandidate, GeocodingPort};

/// A named rewrite of the user's text into a provider query
#[derive(Debug, Clone, Copy)]
pub struct QueryReformulation {
    /// Short name used in logs
    pub name: &'static str,
    rewrite: fn(&str) -> String,
}

impl QueryReformulation {
    /// Build the provider query for `text`
    pub fn apply(&self, text: &str) -> String {
        (self.rewrite)(text)
    }
}

fn with_city_state_country(text: &str) -> String {
    format!("{text}, New York, NY, USA")
}

fn with_city(text: &str) -> String {
    format!("{text}, New York City")
}

fn verbatim(text: &str) -> String {
    text.to_string()
}

/// Queries tried by [`LocationResolver::resolve_address`], in order
pub const QUERY_LADDER: &[QueryReformulation] = &[
    QueryReformulation {
        name: "city_state_country",
        rewrite: with_city_state_country,
    },
    QueryReformulation {
        name: "city",
        rewrite: with_city,
    },
    QueryReformulation {
        name: "verbatim",
        rewrite: verbatim,
    },
];

/// Query used for autocomplete
pub const SUGGEST_QUERY: QueryReformulation = QueryReformulation {
    name: "city",
    rewrite: with_city,
};

/// Minimum trimmed length before an address is resolved
pub const MIN_RESOLVE_CHARS: usize = 2;

/// Minimum trimmed length before suggestions are fetched
pub const MIN_SUGGEST_CHARS: usize = 3;

/// Timing and size knobs for the resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Deadline for each query of the ladder
    pub resolve_timeout: Duration,
    /// Deadline for the autocomplete query
    pub suggest_timeout: Duration,
    /// Courtesy pause before each autocomplete query
    pub suggest_delay: Duration,
    /// Maximum number of suggestions returned
    pub max_suggestions: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            resolve_timeout: Duration::from_secs(10),
            suggest_timeout: Duration::from_secs(5),
            suggest_delay: Duration::from_millis(100),
            max_suggestions: 5,
        }
    }
}

/// Address resolution and autocomplete against a [`GeocodingPort`]
pub struct LocationResolver {
    geocoder: Arc<dyn GeocodingPort>,
    config: ResolverConfig,
}

impl std::fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationResolver")
            .field("geocoder", &"<GeocodingPort>")
            .field("config", &self.config)
            .finish()
    }
}

impl LocationResolver {
    /// Create a resolver with default timings
    pub fn new(geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self {
            geocoder,
            config: ResolverConfig::default(),
        }
    }

    /// Override timings
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Current timings
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve free text to a single in-area location
    ///
    /// Walks [`QUERY_LADDER`] until one query's first candidate lies in the
    /// service area. Transport failures stop the walk immediately.
    #[instrument(skip(self))]
    pub async fn resolve_address(&self, text: &str) -> Result<Location, ResolveError> {
        let text = text.trim();
        if text.chars().count() < MIN_RESOLVE_CHARS {
            return Err(ResolveError::InputTooShort);
        }

        if !self.geocoder.is_configured() {
            warn!("Geocoding API key not configured, cannot resolve address");
            return Err(ResolveError::NoMatch);
        }

        for step in QUERY_LADDER {
            let query = step.apply(text);
            let candidates = match self
                .geocoder
                .search(&query, self.config.resolve_timeout)
                .await
            {
                Ok(candidates) => candidates,
                Err(ApplicationError::Timeout(reason)) => {
                    warn!(step = step.name, %reason, "Geocoding timed out");
                    return Err(ResolveError::Timeout);
                },
                Err(ApplicationError::Configuration(reason)) => {
                    warn!(step = step.name, %reason, "Geocoding rejected our credential");
                    return Err(ResolveError::NoMatch);
                },
                Err(e) => {
                    warn!(step = step.name, error = %e, "Geocoding request failed");
                    return Err(ResolveError::Unreachable(e.to_string()));
                },
            };

            let Some(first) = candidates.first() else {
                debug!(step = step.name, %query, "No candidates");
                continue;
            };

            match to_location(first, &query) {
                Some(location) => {
                    debug!(
                        step = step.name,
                        latitude = location.latitude(),
                        longitude = location.longitude(),
                        "Address resolved"
                    );
                    return Ok(location);
                },
                None => {
                    debug!(
                        step = step.name,
                        latitude = first.latitude,
                        longitude = first.longitude,
                        "First candidate outside service area"
                    );
                },
            }
        }

        Err(ResolveError::NoMatch)
    }

    /// Resolve `text` and, on success, overwrite `slot` in the session
    ///
    /// On failure the session is left untouched.
    pub async fn resolve_into<'s>(
        &self,
        session: &'s mut TripSession,
        slot: LocationSlot,
        text: &str,
    ) -> Result<&'s Location, ResolveError> {
        let location = self.resolve_address(text).await?;
        session.replace_from_query(slot, location, text.trim());
        Ok(session.location(slot))
    }

    /// Autocomplete candidates for partial text
    ///
    /// Never fails: every problem yields an empty list.
    #[instrument(skip(self))]
    pub async fn suggest(&self, text: &str) -> Vec<Location> {
        let text = text.trim();
        if text.chars().count() < MIN_SUGGEST_CHARS || !self.geocoder.is_configured() {
            return Vec::new();
        }

        if !self.config.suggest_delay.is_zero() {
            tokio::time::sleep(self.config.suggest_delay).await;
        }

        let query = SUGGEST_QUERY.apply(text);
        match self
            .geocoder
            .search(&query, self.config.suggest_timeout)
            .await
        {
            Ok(candidates) => candidates
                .iter()
                .filter_map(|c| to_location(c, &query))
                .take(self.config.max_suggestions)
                .collect(),
            Err(e) => {
                debug!(error = %e, "Suggestion lookup failed");
                Vec::new()
            },
        }
    }
}

/// In-area candidates become locations; everything else is dropped
fn to_location(candidate: &GeocodeCandidate, query: &str) -> Option<Location> {
    let label = candidate
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(query);
    Location::new(candidate.latitude, candidate.longitude, label).ok()
}
