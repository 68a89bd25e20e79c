//! Blob storage for uploaded menu images
//!
//! The catalog only ever records the generated filename; everything
//! behind `ImageStore` is swappable (local disk today, object storage
//! tomorrow) without touching the catalog code.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::AppError;

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under `filename`.
    async fn put(&self, filename: &str, bytes: &[u8]) -> Result<(), AppError>;
    /// Remove a stored blob. Absent blobs are not an error.
    async fn delete(&self, filename: &str) -> Result<(), AppError>;
}

/// Local-disk store rooted at the configured uploads directory.
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, filename: &str, bytes: &[u8]) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create upload dir: {e}")))?;
        let path = self.root.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store image: {e}")))?;
        Ok(())
    }

    async fn delete(&self, filename: &str) -> Result<(), AppError> {
        let path = self.root.join(filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::internal(format!("Failed to delete image: {e}"))),
        }
    }
}
