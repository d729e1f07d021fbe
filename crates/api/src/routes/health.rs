use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Healthcheck response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `available`, or `degraded` when the database cannot be reached.
    pub status: &'static str,
    /// Deployment environment from `APP_ENV`.
    pub environment: String,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /v1/healthcheck
async fn healthcheck(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = marquee_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "available" } else { "degraded" };

    Json(HealthResponse {
        status,
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/healthcheck", get(healthcheck))
}
