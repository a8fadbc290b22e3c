//! REST API layer for HTTP request/response handling.
//!
//! # Modules
//!
//! - [`deps`] - Per-request wiring of sessions, repositories and use cases
//! - [`dto`] - Request bodies and query strings
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, rate limiting and tracing
//! - [`routes`] - Route configuration

pub mod deps;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
