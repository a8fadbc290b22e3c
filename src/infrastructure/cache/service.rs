//! Cache contracts and error types.
//!
//! Two layers:
//!
//! - [`CacheBackend`] - raw string storage with expiry. May fail.
//! - [`CacheManager`] - what use cases see. Fail-soft, with JSON helpers.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur inside a cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout() {
            Self::ConnectionError(e.to_string())
        } else {
            Self::OperationError(e.to_string())
        }
    }
}

/// Result type for cache backend operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Raw key/value store with per-key expiry.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisBackend`] - Redis via `ConnectionManager`
/// - [`crate::infrastructure::cache::MemoryBackend`] - In-process map, for tests and local runs
/// - [`crate::infrastructure::cache::NullBackend`] - Stores nothing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Reads a key. Missing and expired keys are `Ok(None)`.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Writes a key that expires after `ttl_seconds`.
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Removes a key. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Round-trips to the backend.
    async fn ping(&self) -> CacheResult<()>;
}

/// Cache as seen by use cases.
///
/// Every method is fail-soft: backend errors are logged and turn into a miss
/// or a no-op, so callers never handle cache failures.
///
/// TTLs are in seconds. A TTL of zero or less makes `set` and `set_json`
/// do nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheManager: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    /// Reads and decodes a JSON payload. An undecodable payload is deleted and
    /// reported as absent.
    async fn get_json(&self, key: &str) -> Option<Value>;

    async fn set(&self, key: &str, value: &str, ttl_seconds: i64);

    async fn set_json(&self, key: &str, value: &Value, ttl_seconds: i64);

    async fn delete(&self, key: &str);

    /// Checks if the backend is reachable. Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
