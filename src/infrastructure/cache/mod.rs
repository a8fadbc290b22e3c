//! Caching layer for read-through lookups by slug.
//!
//! [`CacheManager`] is the fail-soft interface use cases depend on, implemented
//! by [`JsonCacheManager`] over any [`CacheBackend`]:
//! - [`RedisBackend`] - Production Redis-backed storage
//! - [`MemoryBackend`] - In-process storage for tests and local runs
//! - [`NullBackend`] - No-op storage for disabled caching

mod manager;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use manager::JsonCacheManager;
pub use memory_cache::MemoryBackend;
pub use null_cache::NullBackend;
pub use redis_cache::RedisBackend;
pub use service::{CacheBackend, CacheError, CacheManager, CacheResult};

#[cfg(test)]
pub use service::{MockCacheBackend, MockCacheManager};
