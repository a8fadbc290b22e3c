//! In-process cache backend.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::service::{CacheBackend, CacheResult};

/// Deadline used when a TTL does not fit in an `Instant`.
const FOREVER: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A `HashMap` with per-entry deadlines.
///
/// Expired entries are dropped lazily on read. Suitable for a single process
/// only: nothing is shared between instances.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|(_, deadline)| *deadline > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((value, deadline)) if *deadline > now => return Ok(Some(value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        self.entries.write().await.remove(key);
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let now = Instant::now();
        let deadline = now
            .checked_add(Duration::from_secs(ttl_seconds))
            .unwrap_or_else(|| now + FOREVER);
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let backend = MemoryBackend::new();
        backend.set_ex("book:slug:dune", "{}", 60).await.unwrap();

        assert_eq!(
            backend.get("book:slug:dune").await.unwrap(),
            Some("{}".to_string())
        );
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let backend = MemoryBackend::new();
        backend.set_ex("author:slug:x", "{}", 0).await.unwrap();

        assert_eq!(backend.get("author:slug:x").await.unwrap(), None);
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_huge_ttl_never_expires() {
        let backend = MemoryBackend::new();
        backend.set_ex("book:slug:dune", "{}", u64::MAX).await.unwrap();

        assert_eq!(
            backend.get("book:slug:dune").await.unwrap(),
            Some("{}".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_missing_key_succeeds() {
        let backend = MemoryBackend::new();
        assert!(backend.delete("nothing").await.is_ok());
    }
}
