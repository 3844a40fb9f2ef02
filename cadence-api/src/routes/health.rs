/// Service health probe
///
/// `GET /health` answers without authentication so load balancers and
/// uptime checks can poll it. The response distinguishes a process that
/// is up but has lost its database (`degraded`) from a fully working one
/// (`healthy`), and carries the crate version for deploy verification.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Body of the health probe response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Crate version the running binary was built from
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,
}

/// Reports process liveness and database reachability
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let db_ok = sqlx::query("SELECT 1").fetch_one(&state.db).await.is_ok();

    Ok(Json(HealthResponse {
        status: if db_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if db_ok { "connected" } else { "disconnected" }.to_string(),
    }))
}
