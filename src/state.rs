//! Shared application state.
//!
//! Only long-lived, concurrency-safe handles live here. Sessions, repositories
//! and use cases are built per request by [`crate::api::deps::RequestScope`].

use std::sync::Arc;

use sqlx::PgPool;

use crate::infrastructure::cache::CacheManager;
use crate::infrastructure::security::{PasswordHasher, TokenService};
use crate::infrastructure::storage::BlobStorage;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub cache: Arc<dyn CacheManager>,
    pub storage: Arc<dyn BlobStorage>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_service: Arc<dyn TokenService>,
    /// Bucket author photos are uploaded to.
    pub avatars_bucket: String,
}
