//! HTTP middleware for request processing and protection.
//!
//! Authentication extractors, rate limiting, request metrics and tracing.

pub mod auth;
pub mod metrics;
pub mod rate_limit;
pub mod tracing;

pub use auth::{AdminUser, CurrentUser};
