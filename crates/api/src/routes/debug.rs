use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Runtime metrics snapshot served at `/debug/vars`.
#[derive(Serialize)]
pub struct DebugVars {
    pub version: &'static str,
    /// Unix seconds at the time of the request.
    pub timestamp: i64,
    /// Background jobs still running, e.g. welcome emails.
    pub background_tasks: usize,
    pub database: PoolStats,
}

/// Connection pool counters.
#[derive(Serialize)]
pub struct PoolStats {
    /// Open connections, idle or in use.
    pub size: u32,
    pub idle: usize,
    pub max: u32,
}

/// GET /debug/vars
async fn debug_vars(State(state): State<AppState>) -> Json<DebugVars> {
    let pool = &state.pool;

    Json(DebugVars {
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        background_tasks: state.background.len(),
        database: PoolStats {
            size: pool.size(),
            idle: pool.num_idle(),
            max: pool.options().get_max_connections(),
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/debug/vars", get(debug_vars))
}
