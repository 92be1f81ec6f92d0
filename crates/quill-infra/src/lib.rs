//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM repositories (PostgreSQL or SQLite), Argon2 password hashing,
//! JWT-signed session tokens, the in-memory session store, and local image
//! storage.

pub mod auth;
pub mod database;
pub mod session;
pub mod storage;

pub use auth::{Argon2PasswordService, JwtConfig, JwtSessionTokenService};
pub use database::{DatabaseConfig, SqlPostRepository, SqlUserRepository};
pub use session::InMemorySessionStore;
pub use storage::LocalImageStore;
