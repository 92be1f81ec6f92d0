//! Login sessions: issue, resolve and revoke.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::{Session, User};
use crate::error::RepoError;
use crate::ports::{AuthError, SessionStore, SessionTokenService, UserRepository};

/// Ties the session cookie token to a server-side session and a user.
///
/// A token only authenticates while its signature and expiry are valid, its
/// session is still in the store, and the user still exists.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    tokens: Arc<dyn SessionTokenService>,
    users: Arc<dyn UserRepository>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn SessionStore>,
        tokens: Arc<dyn SessionTokenService>,
        users: Arc<dyn UserRepository>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            tokens,
            users,
            ttl,
        }
    }

    /// How long a new session lasts.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session for `user` and return the token for the cookie.
    pub async fn start(&self, user: &User) -> Result<String, AuthError> {
        let session = Session::new(user.id, self.ttl);
        let token =
            self.tokens
                .issue(session.id, session.user_id, session.expires_at.timestamp())?;

        self.store.insert(session).await;

        Ok(token)
    }

    /// Resolve a session token to the logged-in user.
    ///
    /// Returns `Ok(None)` for any token that does not identify a live session.
    pub async fn resolve_current_user(&self, token: &str) -> Result<Option<User>, RepoError> {
        let Ok(claims) = self.tokens.verify(token) else {
            return Ok(None);
        };

        let Some(session) = self.store.get(claims.session_id).await else {
            return Ok(None);
        };

        if session.user_id != claims.user_id {
            return Ok(None);
        }

        self.users.find_by_id(session.user_id).await
    }

    /// Revoke the session behind `token`. Unknown or invalid tokens are ignored.
    pub async fn end(&self, token: &str) {
        if let Ok(claims) = self.tokens.verify(token) {
            self.store.remove(claims.session_id).await;
        }
    }
}
