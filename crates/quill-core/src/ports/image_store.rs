use async_trait::async_trait;

use crate::domain::ImageName;

/// Storage for uploaded post images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `bytes` under `name`, replacing any file with the same name.
    async fn save(&self, name: &ImageName, bytes: &[u8]) -> Result<(), ImageStoreError>;

    /// Whether an image with this name is stored.
    async fn exists(&self, name: &str) -> bool;
}

/// Image storage errors.
#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("I/O error: {0}")]
    Io(String),
}
