//! No-op cache backend for disabled caching.

use super::service::{CacheBackend, CacheResult};
use async_trait::async_trait;
use tracing::debug;

/// A backend that stores nothing.
///
/// Used when Redis is not configured or unreachable at startup. Every read
/// misses, so use cases always go to the database.
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        debug!("Using NullBackend (caching disabled)");
        Self
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for NullBackend {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }
}
