//! Outermost router: mounts the API under `/v1` next to the Prometheus
//! scrape endpoint, and wraps both with request metrics, tracing, a body size
//! cap and trailing-slash trimming.

use crate::api;
use crate::api::handlers::metrics_handler;
use crate::api::middleware::metrics::{METRICS_PATH, track_requests};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware, routing::get};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Upper bound on request bodies, sized for photo uploads.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Mounts `api` under `/v1` with `/metrics` beside it and the shared layers
/// around both.
pub fn service(api: Router<AppState>, state: AppState) -> Router {
    Router::new()
        .nest("/v1", api)
        .route(METRICS_PATH, get(metrics_handler))
        .layer(middleware::from_fn(track_requests))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(tracing::layer())
}

/// Builds the service. `behind_proxy` switches credential rate limiting to
/// forwarded client IPs.
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let router = service(api::routes::routes(behind_proxy), state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
