//! Data Transfer Objects for the grievance API

use serde::{Deserialize, Serialize};
use validator::Validate;

use grievance_core::NewSubmission;

/// File-submission request
///
/// `id` is generated on the client; `type` and `urgency` stay raw strings
/// here so an out-of-range value is rejected by the store rather than the
/// deserializer, per the error taxonomy.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    /// Client-generated identifier
    #[validate(length(min = 1, max = 256))]
    pub id: String,

    /// Submission kind: `complaint` or `petition`
    #[serde(rename = "type")]
    pub kind: String,

    /// Citizen name
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    /// Contact phone, any format
    #[validate(length(min = 1, max = 64))]
    pub phone: String,

    /// Contact email
    pub email: Option<String>,

    /// Target department
    pub department: Option<String>,

    /// Complaint category
    pub category: Option<String>,

    /// Administrative geography
    #[validate(length(min = 1, max = 256))]
    pub taluk: String,

    /// Administrative geography
    #[validate(length(min = 1, max = 256))]
    pub firka: String,

    /// Administrative geography
    #[validate(length(min = 1, max = 256))]
    pub village: String,

    /// Free-form complaint text
    #[validate(length(min = 1))]
    pub description: String,

    /// Urgency: `low`, `medium`, or `high`
    pub urgency: String,

    /// Initial workflow status; defaults to `pending`
    pub status: Option<String>,

    /// Opaque attachment references
    #[serde(default)]
    pub photos: Vec<String>,
}

impl CreateSubmissionRequest {
    pub fn into_new_submission(self) -> NewSubmission {
        NewSubmission {
            id: self.id,
            kind: self.kind,
            name: self.name,
            phone: self.phone,
            email: self.email,
            department: self.department,
            category: self.category,
            taluk: self.taluk,
            firka: self.firka,
            village: self.village,
            description: self.description,
            urgency: self.urgency,
            status: self.status,
            photos: self.photos,
        }
    }
}

/// File-submission response
#[derive(Debug, Serialize)]
pub struct CreateSubmissionResponse {
    pub ok: bool,
    /// The client-supplied id, echoed back
    pub id: String,
}

/// Anonymous tracking query parameters; both are required
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub id: Option<String>,
    pub phone: Option<String>,
}

/// Status transition request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// New workflow status; free-form, `resolved` marks resolution
    #[validate(length(min = 1, max = 256))]
    pub status: String,

    /// Official response appended to the description
    pub response: Option<String>,
}

/// DC/DM PIN login request
#[derive(Debug, Deserialize)]
pub struct DcdmLoginRequest {
    pub pin: Option<String>,
}

/// Official login request
#[derive(Debug, Deserialize)]
pub struct OfficialLoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Bare success response
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Health check response; always returned with HTTP 200
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    #[serde(rename = "dbOk")]
    pub db_ok: bool,
}
