//! Cache implementations
//!
//! - `MokaSessionStore`: in-memory trip sessions with idle eviction

mod moka_session_store;

pub use moka_session_store::{MokaSessionStore, SessionStoreConfig};
