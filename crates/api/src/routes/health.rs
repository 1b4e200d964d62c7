use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Environment and build details reported by the health check.
#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub environment: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `available`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub system_info: SystemInfo,
}

/// GET /v1/healthcheck
async fn healthcheck(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = greenlight_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    Json(HealthResponse {
        status: if db_healthy { "available" } else { "degraded" },
        system_info: SystemInfo {
            environment: state.config.env.as_str(),
            version: env!("CARGO_PKG_VERSION"),
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/healthcheck", get(healthcheck))
}
