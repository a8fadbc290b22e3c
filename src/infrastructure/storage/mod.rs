//! Object storage for uploaded files.
//!
//! Provides the [`BlobStorage`] trait with two implementations:
//! - [`S3Storage`] - S3-compatible storage (MinIO in deployment)
//! - [`DisabledStorage`] - Used when storage is not configured

mod disabled;
mod s3_storage;
mod service;

pub use disabled::DisabledStorage;
pub use s3_storage::{S3Storage, StorageSettings, object_location};
pub use service::{BlobStorage, StorageError, Upload};

#[cfg(test)]
pub use service::MockBlobStorage;
