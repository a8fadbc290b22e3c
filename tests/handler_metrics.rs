mod common;

use book_catalog::telemetry;
use sqlx::PgPool;

// Installs the process-wide recorder, so this binary holds a single test.
#[sqlx::test]
async fn test_metrics_expose_http_and_database_timings(pool: PgPool) {
    telemetry::install().unwrap();
    common::create_test_book(&pool, "Dune", "dune", "science-fiction", None, None).await;
    let server = common::make_server(common::create_test_state(pool));

    server.get("/v1/books/dune").await.assert_status_ok();
    server.get("/v1/books/missing").await.assert_status_not_found();
    server.get("/metrics").await.assert_status_ok();

    let scrape = server.get("/metrics").await;
    scrape.assert_status_ok();
    let body = scrape.text();

    assert!(body.contains("http_requests_total"));
    assert!(body.contains(r#"handler="/v1/books/{book}""#));
    assert!(body.contains(r#"status="2xx""#));
    assert!(body.contains(r#"status="4xx""#));
    assert!(body.contains("db_query_duration_seconds_bucket"));
    assert!(body.contains("redis_operation_seconds_bucket"));
    assert!(!body.contains(r#"handler="/metrics""#));
}
