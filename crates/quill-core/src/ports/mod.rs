//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod image_store;
mod repository;
mod session_store;

pub use auth::{AuthError, PasswordService, SessionClaims, SessionTokenService};
pub use image_store::{ImageStore, ImageStoreError};
pub use repository::{BaseRepository, PostRepository, UserRepository};
pub use session_store::SessionStore;
