use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Session;

/// Server-side session storage. Sessions are held in process, so the
/// operations cannot fail.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session until it expires or is removed.
    async fn insert(&self, session: Session);

    /// Get a live session. Expired sessions are treated as absent.
    async fn get(&self, id: Uuid) -> Option<Session>;

    /// Remove a session. Removing an unknown id is not an error.
    async fn remove(&self, id: Uuid);
}
