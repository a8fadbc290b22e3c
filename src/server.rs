//! Process wiring: pool, migrations, cache and blob store selection, and the
//! HTTP listener.

use crate::config::Config;
use crate::infrastructure::cache::{CacheManager, JsonCacheManager, NullBackend, RedisBackend};
use crate::infrastructure::security::{Argon2Hasher, JwtTokenService};
use crate::infrastructure::storage::{BlobStorage, DisabledStorage, S3Storage};
use crate::routes::app_router;
use crate::state::AppState;
use crate::telemetry;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often idle histogram data is drained between scrapes.
const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Opens a PostgreSQL pool sized and timed from `config.database`.
///
/// # Errors
///
/// Fails when the first connection cannot be made.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let db = &config.database;

    PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(db.connect_timeout)
        .idle_timeout(db.idle_timeout)
        .max_lifetime(db.max_lifetime)
        .connect(&db.url)
        .await
        .context("Failed to connect to database")
}

fn disabled_cache() -> Arc<dyn CacheManager> {
    Arc::new(JsonCacheManager::new(NullBackend::new()))
}

/// Redis when configured and reachable. Any failure degrades to a cache that
/// never hits.
pub async fn build_cache(config: &Config) -> Arc<dyn CacheManager> {
    let Some(redis_url) = config.redis_url.as_deref() else {
        tracing::info!("No Redis configured, caching disabled");
        return disabled_cache();
    };

    match RedisBackend::connect(redis_url).await {
        Ok(backend) => {
            tracing::info!("Caching through Redis");
            Arc::new(JsonCacheManager::new(backend))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Redis unreachable, caching disabled");
            disabled_cache()
        }
    }
}

async fn build_storage(config: &Config) -> Arc<dyn BlobStorage> {
    let Some(settings) = config.storage.clone() else {
        tracing::info!("No object storage configured, photo uploads will fail");
        return Arc::new(DisabledStorage::new());
    };

    Arc::new(S3Storage::connect(settings).await)
}

/// Installs the metrics recorder, connects every backend, applies migrations
/// and serves until Ctrl+C.
///
/// # Errors
///
/// Fails on database connection, migration, bind, or server errors.
pub async fn run(config: Config) -> Result<()> {
    match telemetry::install() {
        Ok(()) => {
            tokio::spawn(async {
                let mut ticker = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
                loop {
                    ticker.tick().await;
                    telemetry::run_upkeep();
                }
            });
        }
        Err(e) => tracing::warn!(error = %e, "Prometheus recorder not installed, /metrics disabled"),
    }

    let pool = connect_pool(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database ready");

    let state = AppState {
        pool,
        cache: build_cache(&config).await,
        storage: build_storage(&config).await,
        password_hasher: Arc::new(Argon2Hasher::new()),
        token_service: Arc::new(JwtTokenService::new(
            &config.auth.secret_key,
            config.auth.access_token_ttl_minutes,
        )),
        avatars_bucket: config.avatars_bucket.clone(),
    };

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Serving book catalog");

    let app = app_router(state, config.behind_proxy);
    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(wait_for_ctrl_c())
    .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Ctrl+C received, draining connections"),
        Err(e) => tracing::error!(error = %e, "Cannot listen for Ctrl+C"),
    }
}
