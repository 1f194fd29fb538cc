//! Health Handler

use axum::{extract::State, Json};

use crate::{dto::HealthResponse, state::AppState};

/// Health check endpoint.
///
/// Always HTTP 200; a database outage is reported through `dbOk` so the
/// frontend can degrade instead of erroring.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = state.submissions.health().await;
    if !db_ok {
        tracing::warn!("database ping failed during health check");
    }
    Json(HealthResponse { ok: true, db_ok })
}
