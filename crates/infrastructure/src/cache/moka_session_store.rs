//! Moka-backed trip session store
//!
//! Sessions live in memory only. Each read or write refreshes the idle
//! timer; a session untouched for `time_to_idle` is evicted, as are the
//! least recently used ones once `max_sessions` is reached.

use std::time::Duration;

use application::{SessionStorePort, error::ApplicationError};
use async_trait::async_trait;
use domain::{SessionId, TripSession};
use moka::future::Cache;
use tracing::{debug, instrument};

/// Configuration for the session store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStoreConfig {
    /// Upper bound on live sessions
    pub max_sessions: u64,
    /// Inactivity period after which a session is dropped
    pub time_to_idle: Duration,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            time_to_idle: Duration::from_secs(60 * 60),
        }
    }
}

/// In-memory session store
pub struct MokaSessionStore {
    cache: Cache<SessionId, TripSession>,
}

impl std::fmt::Debug for MokaSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaSessionStore")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl MokaSessionStore {
    /// Create a store with default limits
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionStoreConfig::default())
    }

    /// Create a store with custom limits
    #[must_use]
    pub fn with_config(config: SessionStoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(config.time_to_idle)
            .build();
        Self { cache }
    }
}

impl Default for MokaSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStorePort for MokaSessionStore {
    #[instrument(skip(self), level = "debug")]
    async fn get(&self, id: &SessionId) -> Result<Option<TripSession>, ApplicationError> {
        let session = self.cache.get(id).await;
        debug!(found = session.is_some(), "Session lookup");
        Ok(session)
    }

    #[instrument(skip(self, session), fields(session_id = %session.id), level = "debug")]
    async fn save(&self, session: &TripSession) -> Result<(), ApplicationError> {
        self.cache.insert(session.id, session.clone()).await;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn remove(&self, id: &SessionId) -> Result<(), ApplicationError> {
        self.cache.invalidate(id).await;
        Ok(())
    }

    async fn count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}
