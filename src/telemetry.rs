//! Prometheus metrics.
//!
//! Samples are recorded through the `metrics` facade everywhere in the crate.
//! [`install`] registers the Prometheus recorder once at startup; until then
//! every sample is dropped. The text exposition is served on `GET /metrics`.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
    pub const REDIS_OPERATION_SECONDS: &str = "redis_operation_seconds";
    pub const DB_QUERY_DURATION_SECONDS: &str = "db_query_duration_seconds";
}

const HTTP_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
const REDIS_BUCKETS: &[f64] = &[
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0,
];
const DB_BUCKETS: &[f64] = &[
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0,
];

fn builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(names::HTTP_REQUEST_DURATION_SECONDS.to_string()),
            HTTP_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full(names::REDIS_OPERATION_SECONDS.to_string()),
            REDIS_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full(names::DB_QUERY_DURATION_SECONDS.to_string()),
            DB_BUCKETS,
        )
}

/// Installs the process-wide recorder. Calling it again is a no-op.
///
/// # Errors
///
/// Fails when another recorder is already installed.
pub fn install() -> Result<(), BuildError> {
    if HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = builder()?.install_recorder()?;
    if HANDLE.set(handle).is_err() {
        tracing::debug!("Prometheus recorder already stored");
    }
    tracing::info!("Prometheus metrics enabled");
    Ok(())
}

/// Text exposition of every metric, `None` before [`install`].
pub fn render() -> Option<String> {
    HANDLE.get().map(PrometheusHandle::render)
}

/// Drains idle histogram data. Call periodically when nothing scrapes.
pub fn run_upkeep() {
    if let Some(handle) = HANDLE.get() {
        handle.run_upkeep();
    }
}

/// Collapses a status code to its class, e.g. `404` to `4xx`.
fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// One served request. `handler` is the route template, never the raw path.
pub fn record_http_request(method: &str, handler: &str, status: u16, elapsed: Duration) {
    counter!(
        names::HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "handler" => handler.to_string(),
        "status" => status_class(status)
    )
    .increment(1);

    histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "handler" => handler.to_string()
    )
    .record(elapsed.as_secs_f64());
}

pub fn record_redis_operation(op: &'static str, ok: bool, elapsed: Duration) {
    let status = if ok { "ok" } else { "error" };
    histogram!(names::REDIS_OPERATION_SECONDS, "op" => op, "status" => status)
        .record(elapsed.as_secs_f64());
}

pub fn record_db_query(elapsed: Duration) {
    histogram!(names::DB_QUERY_DURATION_SECONDS).record(elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(record: impl FnOnce()) -> String {
        let recorder = builder().unwrap().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, record);
        handle.render()
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }

    #[test]
    fn test_http_request_is_counted_by_route_template() {
        let output = rendered(|| {
            record_http_request("GET", "/v1/books/{book}", 200, Duration::from_millis(12));
            record_http_request("GET", "/v1/books/{book}", 404, Duration::from_millis(3));
        });

        assert!(output.contains(r#"handler="/v1/books/{book}""#));
        assert!(output.contains(r#"status="2xx""#));
        assert!(output.contains(r#"status="4xx""#));
        assert!(output.contains("http_request_duration_seconds_bucket"));
    }

    #[test]
    fn test_db_and_redis_timings_use_buckets() {
        let output = rendered(|| {
            record_db_query(Duration::from_millis(2));
            record_redis_operation("get", false, Duration::from_micros(700));
        });

        assert!(output.contains("db_query_duration_seconds_bucket"));
        assert!(output.contains("db_query_duration_seconds_count 1"));
        assert!(output.contains("redis_operation_seconds_bucket"));
        assert!(output.contains(r#"status="error""#));
    }

    #[test]
    fn test_render_before_install_is_none() {
        assert!(render().is_none());
    }
}
