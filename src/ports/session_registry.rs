//! Session Registry Port - Interface for live roleplay sessions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::roleplay::RoleplaySession;

/// A registered session. Holding the lock serializes turns on it.
pub type SharedSession = Arc<Mutex<RoleplaySession>>;

/// Outcome of `insert_if_absent`.
#[derive(Debug, Clone)]
pub enum Registration {
    /// The given session is now registered.
    Inserted(SharedSession),
    /// Another session already held the id; it is returned unchanged.
    Existing(SharedSession),
}

/// Port for the in-process registry of active sessions.
///
/// Implementations bound the number of sessions and expire idle ones.
/// An expired session is indistinguishable from one that never existed.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Fetch a live session and mark it as recently used.
    async fn get(&self, id: &SessionId) -> Option<SharedSession>;

    /// Register a session unless its id is already taken.
    async fn insert_if_absent(&self, session: RoleplaySession) -> Registration;

    /// Drop a session. Returns false when it was not registered.
    async fn remove(&self, id: &SessionId) -> bool;

    /// Number of sessions currently held (expired ones may be included
    /// until the next prune).
    async fn len(&self) -> usize;

    /// Drop every expired session and return how many were removed.
    async fn prune_expired(&self) -> usize;
}
