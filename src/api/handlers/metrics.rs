use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::telemetry;

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// `GET /metrics`
///
/// Prometheus text exposition. 404 when the recorder was never installed.
pub async fn metrics_handler() -> Response {
    match telemetry::render() {
        Some(body) => ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body).into_response(),
        None => (StatusCode::NOT_FOUND, "metrics are not enabled").into_response(),
    }
}
