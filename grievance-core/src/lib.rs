//! Grievance Core Types
//!
//! Domain types shared by the district grievance record system: submission
//! records, their append-only status history, administrative accounts, and
//! the phone normalization used for anonymous citizen tracking.
//!
//! This crate is pure data plus a handful of pure functions; persistence and
//! transport live in `grievance-db` and `grievance-api`.

pub mod phone;
pub mod types;

pub use phone::canonical_phone_key;
pub use types::{
    HistoryEvent, NewSubmission, Official, Submission, SubmissionType, Urgency,
    DEFAULT_STATUS, OFFICIAL_RESPONSE_DELIMITER, RESOLVED_STATUS,
};
