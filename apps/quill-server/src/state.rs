//! Application state - shared across all handlers.

use std::sync::Arc;

use chrono::FixedOffset;
use sea_orm::DbConn;

use quill_core::domain::AllowedExtensions;
use quill_core::ports::{
    ImageStore, ImageStoreError, PasswordService, PostRepository, UserRepository,
};
use quill_core::services::SessionManager;
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtSessionTokenService, random_secret};
use quill_infra::{InMemorySessionStore, LocalImageStore, SqlPostRepository, SqlUserRepository};

use crate::config::AppConfig;
use crate::views::Views;

/// Issuer claim of session tokens.
const TOKEN_ISSUER: &str = "quill";

/// Request-handling settings derived from the configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub allowed_extensions: AllowedExtensions,
    pub max_upload_bytes: usize,
    pub post_offset: FixedOffset,
    pub cookie_secure: bool,
}

/// Shared application state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<SessionManager>,
    pub passwords: Arc<dyn PasswordService>,
    pub images: Arc<dyn ImageStore>,
    pub views: Arc<Views>,
    pub settings: Arc<Settings>,
}

/// Failures while building the state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("image directory unavailable: {0}")]
    Images(#[from] ImageStoreError),

    #[error("templates failed to load: {0}")]
    Templates(#[from] tera::Error),
}

impl AppState {
    /// Build the application state on top of an open database connection.
    pub async fn new(config: &AppConfig, db: DbConn) -> Result<Self, StateError> {
        let posts: Arc<dyn PostRepository> = Arc::new(SqlPostRepository::new(db.clone()));
        let users: Arc<dyn UserRepository> = Arc::new(SqlUserRepository::new(db));

        let secret = match &config.session.secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!(
                    "SESSION_SECRET not set. Using a random secret; sessions end when the process restarts."
                );
                random_secret()
            }
        };
        let tokens = Arc::new(JwtSessionTokenService::new(JwtConfig {
            secret,
            issuer: TOKEN_ISSUER.to_string(),
        }));
        let sessions = Arc::new(SessionManager::new(
            Arc::new(InMemorySessionStore::new()),
            tokens,
            users.clone(),
            config.session.ttl,
        ));

        let images = LocalImageStore::open(&config.uploads.upload_dir).await?;
        tracing::info!(dir = %images.dir().display(), "Image directory ready");

        let settings = Settings {
            allowed_extensions: config.uploads.allowed_extensions.clone(),
            max_upload_bytes: config.uploads.max_bytes,
            post_offset: config.post_offset,
            cookie_secure: config.session.cookie_secure,
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            posts,
            users,
            sessions,
            passwords: Arc::new(Argon2PasswordService::new()),
            images: Arc::new(images),
            views: Arc::new(Views::new()?),
            settings: Arc::new(settings),
        })
    }
}
