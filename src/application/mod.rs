//! Application layer: catalog workflows.
//!
//! Use cases coordinate repository calls inside a unit of work, keep the cache
//! coherent with the database and hand out response shapes the API layer
//! serializes as-is.
//!
//! - [`use_cases`] - One struct per workflow
//! - [`responses`] - Serialized output, also the cached form
//! - [`caching`] - Cache keys and lifetimes

pub mod caching;
pub mod responses;
pub mod use_cases;
