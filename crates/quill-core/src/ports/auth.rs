//! Authentication ports.

use uuid::Uuid;

/// Claims carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub session_id: Uuid,
    pub user_id: i32,
    pub exp: i64,
}

/// Signs and verifies the token stored in the session cookie.
pub trait SessionTokenService: Send + Sync {
    /// Issue a signed token for a session.
    fn issue(&self, session_id: Uuid, user_id: i32, exp: i64) -> Result<String, AuthError>;

    /// Verify a token's signature and expiry and decode its claims.
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
