//! Submission and official record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status value that marks a submission as resolved.
///
/// Status is otherwise a free-form string chosen by officials; this is the
/// only value with structural meaning (it sets `resolved_at` once).
pub const RESOLVED_STATUS: &str = "resolved";

/// Delimiter prepended to each official response appended to a description.
pub const OFFICIAL_RESPONSE_DELIMITER: &str = "\n\n--- Official Response ---\n";

/// Default status assigned when a citizen files without one.
pub const DEFAULT_STATUS: &str = "pending";

/// Kind of submission a citizen can file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Complaint,
    Petition,
}

impl SubmissionType {
    /// Parse from the wire/database representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "complaint" => Some(Self::Complaint),
            "petition" => Some(Self::Petition),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complaint => "complaint",
            Self::Petition => "petition",
        }
    }
}

/// Citizen-declared urgency of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Parse from the wire/database representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One entry in a submission's append-only status history.
///
/// Events are written by the store on creation and on every status
/// transition; they are never edited or removed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub response: Option<String>,
}

/// A citizen-filed complaint or petition record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Client-supplied identifier, unique across all submissions.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SubmissionType,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub taluk: String,
    pub firka: String,
    pub village: String,
    /// Mutable text; official responses are appended under
    /// [`OFFICIAL_RESPONSE_DELIMITER`].
    pub description: String,
    pub urgency: Urgency,
    /// Free-form workflow status. Only [`RESOLVED_STATUS`] is privileged.
    pub status: String,
    /// Opaque attachment references, passed through unmodified.
    pub photos: Vec<String>,
    /// Append-only ledger, length >= 1 once the record exists.
    pub history: Vec<HistoryEvent>,
    /// Creation time, immutable.
    pub timestamp: DateTime<Utc>,
    /// Refreshed on every status transition; never before `timestamp`.
    pub last_updated: DateTime<Utc>,
    /// Set once when status first becomes [`RESOLVED_STATUS`]; sticky
    /// afterwards even if the status later moves away.
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Citizen input for filing a submission.
///
/// `kind` and `urgency` are carried as raw strings here; the store parses
/// them so an invalid value can never reach persisted state.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubmission {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub taluk: String,
    pub firka: String,
    pub village: String,
    pub description: String,
    pub urgency: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Administrative account used for official login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Official {
    pub id: i32,
    pub username: String,
    pub password: String,
}
