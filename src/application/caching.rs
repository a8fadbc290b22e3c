//! Cache keys, lifetimes and typed helpers for read-through lookups.
//!
//! Keys follow `{entity}:{lookup_field}:{value}`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::infrastructure::cache::CacheManager;

/// Lifetime of a cached author, in seconds.
pub const AUTHOR_CACHE_TTL_SECONDS: i64 = 120;

/// Lifetime of a cached book, in seconds.
pub const BOOK_CACHE_TTL_SECONDS: i64 = 60;

pub fn author_by_slug(slug: &str) -> String {
    format!("author:slug:{slug}")
}

pub fn book_by_slug(slug: &str) -> String {
    format!("book:slug:{slug}")
}

/// Reads a cached value of type `T`.
///
/// A payload that is valid JSON but not a `T` is deleted and treated as a
/// miss, so the caller reloads and overwrites it.
pub async fn load<T: DeserializeOwned>(cache: &dyn CacheManager, key: &str) -> Option<T> {
    let value = cache.get_json(key).await?;

    match serde_json::from_value(value) {
        Ok(typed) => Some(typed),
        Err(e) => {
            warn!(key, error = %e, "Cached payload has an unexpected shape");
            cache.delete(key).await;
            None
        }
    }
}

/// Stores `value` as JSON under `key`.
pub async fn store<T: Serialize>(
    cache: &dyn CacheManager,
    key: &str,
    value: &T,
    ttl_seconds: i64,
) {
    match serde_json::to_value(value) {
        Ok(json) => cache.set_json(key, &json, ttl_seconds).await,
        Err(e) => warn!(key, error = %e, "Failed to serialize value for cache"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::{JsonCacheManager, MemoryBackend};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        slug: String,
    }

    #[test]
    fn test_key_layout() {
        assert_eq!(author_by_slug("thomas-shelby"), "author:slug:thomas-shelby");
        assert_eq!(book_by_slug("dune"), "book:slug:dune");
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let cache = JsonCacheManager::new(MemoryBackend::new());
        let entry = Entry {
            slug: "dune".to_string(),
        };

        store(&cache, "book:slug:dune", &entry, 60).await;

        assert_eq!(load::<Entry>(&cache, "book:slug:dune").await, Some(entry));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_evicted() {
        let cache = JsonCacheManager::new(MemoryBackend::new());
        cache
            .set_json("book:slug:dune", &json!({ "unexpected": true }), 60)
            .await;

        assert_eq!(load::<Entry>(&cache, "book:slug:dune").await, None);
        assert!(cache.backend().is_empty().await);
    }
}
