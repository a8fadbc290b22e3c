//! Request counting and latency per route.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::telemetry;

/// Path of the scrape endpoint, which is not measured.
pub const METRICS_PATH: &str = "/metrics";

/// Records `http_requests_total` and `http_request_duration_seconds` labelled
/// by method, route template and status class. Requests that matched no
/// route are labelled `unmatched`.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let handler = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |path| path.as_str().to_string());

    if handler == METRICS_PATH {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let started = Instant::now();
    let response = next.run(request).await;

    telemetry::record_http_request(
        method.as_str(),
        &handler,
        response.status().as_u16(),
        started.elapsed(),
    );

    response
}
