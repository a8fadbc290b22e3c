use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{ComponentHealth, Components, HealthReport, Overall};
use crate::state::AppState;

/// `GET /v1/health`
///
/// 200 when PostgreSQL answers and the cache backend responds to a ping,
/// 503 with the same body otherwise. A disabled cache counts as healthy.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = HealthReport::from_components(Components {
        database: check_database(&state).await,
        cache: check_cache(&state).await,
    });

    let status = match report.status {
        Overall::Healthy => StatusCode::OK,
        Overall::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(report))
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await;

    match ping {
        Ok(_) => ComponentHealth::passing("Connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            ComponentHealth::failing(format!("Database error: {e}"))
        }
    }
}

async fn check_cache(state: &AppState) -> ComponentHealth {
    if state.cache.health_check().await {
        ComponentHealth::passing("Cache reachable")
    } else {
        ComponentHealth::failing("Cache unreachable")
    }
}
