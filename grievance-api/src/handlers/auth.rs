//! Auth Handlers
//!
//! Stateless credential checks: a configured DC/DM PIN and official
//! username/password records. No sessions or tokens are issued; the
//! frontend re-sends nothing and simply gates its admin views on a 200.

use axum::{extract::State, Json};
use subtle::ConstantTimeEq;

use crate::{
    dto::{DcdmLoginRequest, OfficialLoginRequest, OkResponse},
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Constant-time string equality; length mismatches compare unequal.
fn credentials_match(supplied: &str, expected: &str) -> bool {
    supplied.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// DC/DM PIN login
pub async fn dcdm_login(
    State(state): State<AppState>,
    Json(request): Json<DcdmLoginRequest>,
) -> ApiResult<Json<OkResponse>> {
    match request.pin {
        Some(pin) if credentials_match(&pin, &state.dcdm_pin) => Ok(Json(OkResponse::ok())),
        _ => Err(ApiError::unauthorized("Invalid PIN")),
    }
}

/// Official username/password login
pub async fn official_login(
    State(state): State<AppState>,
    Json(request): Json<OfficialLoginRequest>,
) -> ApiResult<Json<OkResponse>> {
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(ApiError::bad_request("username and password required"));
    };

    let official = state.officials.find_by_username(&username).await?;
    match official {
        Some(official) if credentials_match(&password, &official.password) => {
            Ok(Json(OkResponse::ok()))
        }
        _ => {
            tracing::debug!(username, "rejected official login");
            Err(ApiError::unauthorized("Invalid credentials"))
        }
    }
}
