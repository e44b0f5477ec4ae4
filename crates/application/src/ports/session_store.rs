//! Trip session storage port

use async_trait::async_trait;
use domain::{SessionId, TripSession};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for per-browser trip session persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Get a session by ID
    async fn get(&self, id: &SessionId) -> Result<Option<TripSession>, ApplicationError>;

    /// Insert or overwrite a session
    async fn save(&self, session: &TripSession) -> Result<(), ApplicationError>;

    /// Drop a session
    async fn remove(&self, id: &SessionId) -> Result<(), ApplicationError>;

    /// Number of sessions currently held
    async fn count(&self) -> u64;
}
