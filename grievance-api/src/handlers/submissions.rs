//! Submission Handlers
//!
//! HTTP handlers for filing, listing, tracking, and transitioning
//! submissions.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use grievance_core::Submission;
use grievance_db::SubmissionFilter;

use crate::{
    dto::{CreateSubmissionRequest, CreateSubmissionResponse, LookupParams, OkResponse,
        UpdateStatusRequest},
    error::{ApiError, ApiResult},
    state::AppState,
};

/// File a new submission
pub async fn create_submission(
    State(state): State<AppState>,
    Json(request): Json<CreateSubmissionRequest>,
) -> ApiResult<Json<CreateSubmissionResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let id = state
        .submissions
        .file(request.into_new_submission())
        .await?;
    Ok(Json(CreateSubmissionResponse { ok: true, id }))
}

/// List submissions with optional filter criteria
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(filter): Query<SubmissionFilter>,
) -> ApiResult<Json<Vec<Submission>>> {
    let submissions = state.submissions.search(&filter).await?;
    Ok(Json(submissions))
}

/// Anonymous citizen tracking by id and phone
///
/// A miss returns a `null` body rather than an error, so callers cannot
/// probe which ids exist.
pub async fn lookup_submission(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> ApiResult<Json<Option<Submission>>> {
    let (Some(id), Some(phone)) = (params.id, params.phone) else {
        return Err(ApiError::bad_request("id and phone required"));
    };
    if id.is_empty() || phone.is_empty() {
        return Err(ApiError::bad_request("id and phone required"));
    }

    let submission = state.submissions.track(&id, &phone).await?;
    Ok(Json(submission))
}

/// Fetch one submission by id, or `null`
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Submission>>> {
    let submission = state.submissions.fetch(&id).await?;
    Ok(Json(submission))
}

/// Official status transition
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<OkResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    state
        .submissions
        .update_status(&id, &request.status, request.response.as_deref())
        .await?;
    Ok(Json(OkResponse::ok()))
}
