//! API Router
//!
//! Route definitions for the grievance API.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, state::AppState};

/// Create the API router
///
/// `/api/submissions/lookup` is registered ahead of `/api/submissions/:id`;
/// the static segment wins, so "lookup" is never captured as an id.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health_check))
        // Submission endpoints
        .route(
            "/api/submissions",
            post(handlers::create_submission).get(handlers::list_submissions),
        )
        .route("/api/submissions/lookup", get(handlers::lookup_submission))
        .route("/api/submissions/:id", get(handlers::get_submission))
        .route("/api/submissions/:id/status", post(handlers::update_status))
        // Auth endpoints
        .route("/api/auth/dcdm", post(handlers::dcdm_login))
        .route("/api/auth/official", post(handlers::official_login))
        .with_state(state)
}
