//! Local filesystem image store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use quill_core::domain::ImageName;
use quill_core::ports::{ImageStore, ImageStoreError};

/// Stores images as plain files in one directory, keyed by their name.
///
/// Writes are not locked: two uploads with the same name race and the last
/// one wins.
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    /// Use `dir`, creating it if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, ImageStoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ImageStoreError::Io(format!("{}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, name: &ImageName, bytes: &[u8]) -> Result<(), ImageStoreError> {
        let path = self.path_of(name.as_str());
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ImageStoreError::Io(format!("{}: {e}", path.display())))?;

        tracing::debug!(filename = %name, bytes = bytes.len(), "Image written");
        Ok(())
    }

    async fn exists(&self, name: &str) -> bool {
        tokio::fs::try_exists(self.path_of(name))
            .await
            .unwrap_or(false)
    }
}
