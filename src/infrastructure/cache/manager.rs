//! Fail-soft JSON cache manager.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::service::{CacheBackend, CacheManager, CacheResult};
use crate::telemetry;

/// [`CacheManager`] over a [`CacheBackend`].
///
/// Each backend call is timed into the `redis_operation_seconds` histogram,
/// labelled by operation and outcome. Failures are logged at `warn` and
/// swallowed.
pub struct JsonCacheManager<B: CacheBackend> {
    backend: B,
}

impl<B: CacheBackend> JsonCacheManager<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn timed<T, F>(&self, op: &'static str, fut: F) -> CacheResult<T>
    where
        F: Future<Output = CacheResult<T>>,
    {
        let started = Instant::now();
        let result = fut.await;
        telemetry::record_redis_operation(op, result.is_ok(), started.elapsed());
        result
    }
}

#[async_trait]
impl<B: CacheBackend> CacheManager for JsonCacheManager<B> {
    async fn get(&self, key: &str) -> Option<String> {
        match self.timed("get", self.backend.get(key)).await {
            Ok(Some(value)) => {
                debug!(key, "Cache HIT");
                Some(value)
            }
            Ok(None) => {
                debug!(key, "Cache MISS");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Cache GET failed");
                None
            }
        }
    }

    async fn get_json(&self, key: &str) -> Option<Value> {
        let raw = self.get(key).await?;

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Dropping undecodable cache entry");
                self.delete(key).await;
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) {
        let Ok(ttl) = u64::try_from(ttl_seconds) else {
            return;
        };
        if ttl == 0 {
            return;
        }

        match self.timed("set", self.backend.set_ex(key, value, ttl)).await {
            Ok(()) => debug!(key, ttl, "Cache SET"),
            Err(e) => warn!(key, error = %e, "Cache SET failed"),
        }
    }

    async fn set_json(&self, key: &str, value: &Value, ttl_seconds: i64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.set(key, &raw, ttl_seconds).await,
            Err(e) => warn!(key, error = %e, "Failed to serialize cache payload"),
        }
    }

    async fn delete(&self, key: &str) {
        match self.timed("delete", self.backend.delete(key)).await {
            Ok(()) => debug!(key, "Cache INVALIDATE"),
            Err(e) => warn!(key, error = %e, "Cache DEL failed"),
        }
    }

    async fn health_check(&self) -> bool {
        self.timed("ping", self.backend.ping()).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::{CacheError, MemoryBackend, MockCacheBackend};
    use serde_json::json;

    fn connection_refused() -> CacheError {
        CacheError::ConnectionError("connection refused".to_string())
    }

    #[tokio::test]
    async fn test_json_round_trip_through_memory_backend() {
        let cache = JsonCacheManager::new(MemoryBackend::new());
        let payload = json!({ "slug": "dune", "title": "Dune" });

        cache.set_json("book:slug:dune", &payload, 60).await;

        assert_eq!(cache.get_json("book:slug:dune").await, Some(payload));
    }

    #[tokio::test]
    async fn test_non_positive_ttl_is_a_no_op() {
        let mut backend = MockCacheBackend::new();
        backend.expect_set_ex().times(0);

        let cache = JsonCacheManager::new(backend);
        cache.set("k", "v", 0).await;
        cache.set_json("k", &json!({}), -5).await;
    }

    #[tokio::test]
    async fn test_backend_get_error_is_a_miss() {
        let mut backend = MockCacheBackend::new();
        backend
            .expect_get()
            .times(1)
            .returning(|_| Err(connection_refused()));

        let cache = JsonCacheManager::new(backend);

        assert_eq!(cache.get_json("author:slug:x").await, None);
    }

    #[tokio::test]
    async fn test_backend_write_errors_are_swallowed() {
        let mut backend = MockCacheBackend::new();
        backend
            .expect_set_ex()
            .times(1)
            .returning(|_, _, _| Err(connection_refused()));
        backend
            .expect_delete()
            .times(1)
            .returning(|_| Err(connection_refused()));

        let cache = JsonCacheManager::new(backend);
        cache.set("k", "v", 10).await;
        cache.delete("k").await;
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_deleted() {
        let mut backend = MockCacheBackend::new();
        backend
            .expect_get()
            .times(1)
            .returning(|_| Ok(Some("{not json".to_string())));
        backend
            .expect_delete()
            .withf(|key| key == "book:slug:broken")
            .times(1)
            .returning(|_| Ok(()));

        let cache = JsonCacheManager::new(backend);

        assert_eq!(cache.get_json("book:slug:broken").await, None);
    }

    #[tokio::test]
    async fn test_health_check_reflects_ping() {
        let mut backend = MockCacheBackend::new();
        backend
            .expect_ping()
            .times(1)
            .returning(|| Err(connection_refused()));

        let cache = JsonCacheManager::new(backend);

        assert!(!cache.health_check().await);
    }
}
