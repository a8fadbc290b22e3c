#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use book_catalog::api::routes::{auth_routes, catalog_routes};
use book_catalog::domain::entities::Role;
use book_catalog::routes;
use book_catalog::infrastructure::cache::{CacheManager, JsonCacheManager, MemoryBackend};
use book_catalog::infrastructure::security::{
    Argon2Hasher, JwtTokenService, PasswordHasher, TokenService,
};
use book_catalog::infrastructure::storage::{BlobStorage, DisabledStorage, StorageError, Upload};
use book_catalog::state::AppState;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_PASSWORD: &str = "password123";
pub const AVATARS_BUCKET: &str = "avatars";

/// Blob storage that keeps nothing and remembers what it was asked to do.
#[derive(Default)]
pub struct RecordingStorage {
    pub saved: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl BlobStorage for RecordingStorage {
    async fn save(
        &self,
        upload: Upload,
        bucket: &str,
        _public: bool,
    ) -> Result<String, StorageError> {
        let name = upload.file_name.unwrap_or_else(|| "blob".to_string());
        let url = format!("http://storage.test/{bucket}/{}-{name}", Uuid::new_v4());
        self.saved.lock().unwrap().push(url.clone());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        self.deleted.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub fn memory_cache() -> Arc<JsonCacheManager<MemoryBackend>> {
    Arc::new(JsonCacheManager::new(MemoryBackend::new()))
}

pub fn create_test_state_with(
    pool: PgPool,
    cache: Arc<dyn CacheManager>,
    storage: Arc<dyn BlobStorage>,
) -> AppState {
    AppState {
        pool,
        cache,
        storage,
        password_hasher: Arc::new(Argon2Hasher::new()),
        token_service: Arc::new(JwtTokenService::new(TEST_SECRET, 60)),
        avatars_bucket: AVATARS_BUCKET.to_string(),
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with(pool, memory_cache(), Arc::new(DisabledStorage::new()))
}

/// The full service without the rate limiter, which needs a peer address.
pub fn make_server(state: AppState) -> TestServer {
    let app = routes::service(catalog_routes().merge(auth_routes()), state);
    TestServer::new(app).unwrap()
}

pub fn token_for(user_id: Uuid) -> String {
    JwtTokenService::new(TEST_SECRET, 60)
        .create_access_token(user_id)
        .unwrap()
}

pub fn bearer(user_id: Uuid) -> String {
    format!("Bearer {}", token_for(user_id))
}

pub async fn create_test_user(pool: &PgPool, email: &str, role: Role) -> Uuid {
    let id = Uuid::new_v4();
    let hashed = Argon2Hasher::new().hash(TEST_PASSWORD).unwrap();

    sqlx::query(
        "INSERT INTO users (id, email, hashed_password, first_name, last_name, role) \
         VALUES ($1, $2, $3, 'Test', 'Reader', $4)",
    )
    .bind(id)
    .bind(email)
    .bind(hashed)
    .bind(role.as_str())
    .execute(pool)
    .await
    .unwrap();

    id
}

pub async fn create_test_author(pool: &PgPool, name: &str, slug: &str) -> Uuid {
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO authors (id, name, slug) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await
        .unwrap();

    id
}

pub async fn create_test_book(
    pool: &PgPool,
    title: &str,
    slug: &str,
    genre: &str,
    publish_year: Option<i32>,
    page_count: Option<i32>,
) -> Uuid {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO books (id, title, slug, genre, publish_year, page_count) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id)
    .bind(title)
    .bind(slug)
    .bind(genre)
    .bind(publish_year)
    .bind(page_count)
    .execute(pool)
    .await
    .unwrap();

    id
}

pub async fn set_book_author(pool: &PgPool, book_id: Uuid, author_id: Uuid) {
    sqlx::query("UPDATE books SET author_id = $2 WHERE id = $1")
        .bind(book_id)
        .bind(author_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
