use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Human-readable summary.
    pub message: &'static str,
    /// Whether the database answered a trivial query.
    pub database: &'static str,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.db.health_check().await;

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        message: "Kasir API running",
        database: if db_healthy { "connected" } else { "unreachable" },
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
