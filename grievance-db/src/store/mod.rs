//! Storage interfaces and backends.
//!
//! The traits here are the seam between the service layer and persistence.
//! `postgres` is the production backend; `memory` backs tests and local
//! development. Both must agree on the semantics pinned by the memory
//! backend's test suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use grievance_core::{NewSubmission, Official, Submission};

use crate::error::StoreResult;
use crate::filter::SubmissionFilter;

/// Persistent table of submission records.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert a new submission.
    ///
    /// Sets `timestamp = last_updated = now()`, `resolved_at = NULL`, and an
    /// initial history event carrying the effective status (`"pending"` when
    /// none was supplied). Fails with `DuplicateId` when the id exists and
    /// with `Validation` when `type` or `urgency` is out of range; the store
    /// parses both so a violation can never reach persisted state.
    async fn create(&self, new: &NewSubmission) -> StoreResult<Submission>;

    /// Fetch a submission by exact id.
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Submission>>;

    /// Fetch for the anonymous citizen-tracking flow.
    ///
    /// The id is matched case-insensitively AND the stored phone must share
    /// the supplied phone's canonical key. A miss on either is `Ok(None)`,
    /// never an error, so the endpoint cannot leak whether an id exists.
    async fn get_by_id_and_phone(&self, id: &str, phone: &str)
        -> StoreResult<Option<Submission>>;

    /// List submissions matching `filter`, most recently updated first
    /// (ties broken by creation time), capped at [`crate::MAX_RESULTS`].
    async fn list(&self, filter: &SubmissionFilter) -> StoreResult<Vec<Submission>>;

    /// Apply a status transition as one atomic write.
    ///
    /// Sets the status, refreshes `last_updated`, appends any response to
    /// the description under the official-response delimiter, appends the
    /// history event, and on a transition to `"resolved"` sets
    /// `resolved_at` only if it is still unset (sticky). Fails with
    /// `NotFound` when the id does not exist.
    async fn transition_status(
        &self,
        id: &str,
        status: &str,
        response: Option<&str>,
    ) -> StoreResult<()>;

    /// Cheap liveness probe against the backend.
    async fn health_check(&self) -> StoreResult<()>;
}

/// Administrative account lookup and bootstrap seeding.
#[async_trait]
pub trait OfficialDirectory: Send + Sync {
    /// Fetch an official by exact username.
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Official>>;

    /// Insert the bootstrap account unless the username already exists.
    async fn seed_official(&self, username: &str, password: &str) -> StoreResult<()>;
}
