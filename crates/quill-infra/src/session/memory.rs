//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Session;
use quill_core::ports::SessionStore;

/// Session store backed by a HashMap behind an async RwLock.
///
/// Sessions do not survive a restart. Expired entries are dropped when read.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored sessions, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired());
        sessions.insert(session.id, session);
    }

    async fn get(&self, id: Uuid) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id)?;

        if session.is_expired() {
            drop(sessions);
            self.sessions.write().await.remove(&id);
            return None;
        }

        Some(session.clone())
    }

    async fn remove(&self, id: Uuid) {
        self.sessions.write().await.remove(&id);
    }
}
