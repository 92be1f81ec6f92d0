//! Authentication implementations.

mod password;
mod session_token;

pub use password::Argon2PasswordService;
pub use session_token::{JwtConfig, JwtSessionTokenService, random_secret};
