//! Placeholder store used when no object storage is configured.

use async_trait::async_trait;
use tracing::debug;

use super::service::{BlobStorage, StorageError, Upload};

/// A store that refuses every operation.
///
/// Lets the service start without MinIO; photo uploads then fail with
/// [`StorageError::Configuration`].
pub struct DisabledStorage;

impl DisabledStorage {
    pub fn new() -> Self {
        debug!("Using DisabledStorage (blob storage not configured)");
        Self
    }
}

impl Default for DisabledStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStorage for DisabledStorage {
    async fn save(
        &self,
        _upload: Upload,
        _bucket: &str,
        _public: bool,
    ) -> Result<String, StorageError> {
        Err(StorageError::Configuration("MINIO_ENDPOINT is not set".to_string()))
    }

    async fn delete(&self, _url: &str) -> Result<(), StorageError> {
        Err(StorageError::Configuration("MINIO_ENDPOINT is not set".to_string()))
    }
}
