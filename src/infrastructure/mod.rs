//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Fail-soft cache manager over Redis, in-memory or no-op backends
//! - [`persistence`] - PostgreSQL session and repositories
//! - [`security`] - Argon2 password hashing and JWT access tokens
//! - [`storage`] - S3-compatible blob storage for author photos

pub mod cache;
pub mod persistence;
pub mod security;
pub mod storage;
