//! Trip session service
//!
//! Loads, creates and updates the per-browser [`TripSession`].

use std::sync::Arc;

use domain::{DomainError, Location, LocationSlot, SessionId, TripSession};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::SessionStorePort;

/// Application service around [`SessionStorePort`]
pub struct SessionService {
    store: Arc<dyn SessionStorePort>,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("store", &"<SessionStorePort>")
            .finish()
    }
}

impl SessionService {
    /// Create a new session service
    pub fn new(store: Arc<dyn SessionStorePort>) -> Self {
        Self { store }
    }

    /// Return the stored session, or default locations under the given ID
    ///
    /// Nothing is stored here: a session only lands in the store with its
    /// first change. Without an ID a new one is minted. An unknown ID gets
    /// the defaults, never another browser's state.
    #[instrument(skip(self))]
    pub async fn load_or_default(
        &self,
        id: Option<SessionId>,
    ) -> Result<TripSession, ApplicationError> {
        let Some(id) = id else {
            return Ok(TripSession::new());
        };
        match self.store.get(&id).await? {
            Some(session) => Ok(session),
            None => {
                debug!(%id, "No stored session, using defaults");
                Ok(TripSession::with_id(id))
            },
        }
    }

    /// Apply a manual coordinate edit or map click
    ///
    /// Out-of-area coordinates are rejected and nothing is saved.
    #[instrument(skip(self))]
    pub async fn set_coordinates(
        &self,
        id: SessionId,
        slot: LocationSlot,
        latitude: f64,
        longitude: f64,
    ) -> Result<TripSession, ApplicationError> {
        self.update(id, |session| {
            session
                .set_coordinates(slot, latitude, longitude)
                .map(|_| ())
        })
        .await
    }

    /// Apply a chosen autocomplete suggestion
    #[instrument(skip(self, location), fields(label = location.label()))]
    pub async fn select_location(
        &self,
        id: SessionId,
        slot: LocationSlot,
        location: Location,
    ) -> Result<TripSession, ApplicationError> {
        let label = location.label().to_string();
        self.apply_resolved(id, slot, location, &label).await
    }

    /// Store a location resolved from address text
    ///
    /// Only `slot` changes; the other slot keeps whatever was stored last.
    #[instrument(skip(self, location))]
    pub async fn apply_resolved(
        &self,
        id: SessionId,
        slot: LocationSlot,
        location: Location,
        query: &str,
    ) -> Result<TripSession, ApplicationError> {
        let query = query.trim().to_string();
        self.update(id, move |session| {
            session.replace_from_query(slot, location, query);
            Ok(())
        })
        .await
    }

    /// Put both locations back to their defaults, keeping the ID
    #[instrument(skip(self))]
    pub async fn reset(&self, id: SessionId) -> Result<TripSession, ApplicationError> {
        self.store.remove(&id).await?;
        Ok(TripSession::with_id(id))
    }

    /// Number of stored sessions
    pub async fn active_sessions(&self) -> u64 {
        self.store.count().await
    }

    /// Reload the latest stored state, change it and save it back
    async fn update<F>(&self, id: SessionId, change: F) -> Result<TripSession, ApplicationError>
    where
        F: FnOnce(&mut TripSession) -> Result<(), DomainError> + Send,
    {
        let mut session = self.load_or_default(Some(id)).await?;
        change(&mut session)?;
        self.store.save(&session).await?;
        Ok(session)
    }
}
