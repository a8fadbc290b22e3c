//! Blob storage contract.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// A file received from a client, ready to be stored.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Errors raised by a blob store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("blob storage is not configured: {0}")]
    Configuration(String),

    #[error("failed to upload file: {0}")]
    Upload(String),

    #[error("failed to delete file: {0}")]
    Delete(String),

    #[error("invalid file url: {0}")]
    InvalidUrl(String),
}

/// Object store holding uploaded files.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::S3Storage`] - S3-compatible store (MinIO)
/// - [`crate::infrastructure::storage::DisabledStorage`] - Rejects every call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Stores `upload` under a fresh object name in `bucket`.
    ///
    /// Returns a permanent URL when `public`, otherwise a time-limited signed URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Upload`] when the store rejects the object.
    async fn save(
        &self,
        upload: Upload,
        bucket: &str,
        public: bool,
    ) -> Result<String, StorageError>;

    /// Deletes the object a URL returned by [`BlobStorage::save`] points to.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidUrl`] when the URL does not name a bucket
    /// and object, [`StorageError::Delete`] when the store fails.
    async fn delete(&self, url: &str) -> Result<(), StorageError>;
}
