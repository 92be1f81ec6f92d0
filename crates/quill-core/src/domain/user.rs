use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum number of characters in a username.
pub const USERNAME_MAX_CHARS: usize = 30;

/// User entity - an administrator account.
///
/// Only the salted hash of the password is ever held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// A user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }
}

/// Check a signup username.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.trim().is_empty() {
        return Err(DomainError::Validation("Username is required".to_string()));
    }
    if username.chars().count() > USERNAME_MAX_CHARS {
        return Err(DomainError::Validation(format!(
            "Username must be at most {USERNAME_MAX_CHARS} characters"
        )));
    }
    Ok(())
}
