//! Submission orchestration service.
//!
//! Composes the normalizer, filter builder, and submission store into the
//! operations the HTTP layer exposes: file, search, track, fetch, and
//! status transition.

use std::sync::Arc;

use grievance_core::{NewSubmission, Submission, DEFAULT_STATUS};

use crate::error::{StoreError, StoreResult};
use crate::filter::SubmissionFilter;
use crate::store::SubmissionStore;

/// Fields a citizen must supply to file a submission.
const REQUIRED_FIELDS: [&str; 6] = ["name", "phone", "taluk", "firka", "village", "description"];

/// Orchestrator for the submission lifecycle.
pub struct SubmissionService {
    store: Arc<dyn SubmissionStore>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }

    /// File a new submission and return its id.
    ///
    /// Rejects empty required fields, defaults the status to `"pending"`,
    /// and delegates the insert (with its duplicate/enum checks) to the
    /// store.
    pub async fn file(&self, new: NewSubmission) -> StoreResult<String> {
        for (field, value) in REQUIRED_FIELDS.iter().zip([
            &new.name,
            &new.phone,
            &new.taluk,
            &new.firka,
            &new.village,
            &new.description,
        ]) {
            if value.trim().is_empty() {
                return Err(StoreError::Validation(format!("{field} is required")));
            }
        }
        if new.id.trim().is_empty() {
            return Err(StoreError::Validation("id is required".to_string()));
        }

        let mut new = new;
        if new.status.is_none() {
            new.status = Some(DEFAULT_STATUS.to_string());
        }

        let created = self.store.create(&new).await?;
        tracing::info!(id = %created.id, kind = %created.kind.as_str(), "submission filed");
        Ok(created.id)
    }

    /// List submissions matching the supplied criteria.
    pub async fn search(&self, filter: &SubmissionFilter) -> StoreResult<Vec<Submission>> {
        self.store.list(filter).await
    }

    /// Fetch one submission by exact id.
    pub async fn fetch(&self, id: &str) -> StoreResult<Option<Submission>> {
        self.store.get_by_id(id).await
    }

    /// Anonymous citizen tracking by id and phone.
    ///
    /// A miss is `Ok(None)` by design; the caller must not be able to tell
    /// an unknown id from a wrong phone.
    pub async fn track(&self, id: &str, phone: &str) -> StoreResult<Option<Submission>> {
        self.store.get_by_id_and_phone(id, phone).await
    }

    /// Apply an official status transition.
    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        response: Option<&str>,
    ) -> StoreResult<()> {
        if status.trim().is_empty() {
            return Err(StoreError::Validation("status is required".to_string()));
        }
        self.store.transition_status(id, status, response).await?;
        tracing::info!(id, status, "submission status updated");
        Ok(())
    }

    /// Backend liveness, surfaced by the health endpoint.
    pub async fn health(&self) -> bool {
        self.store.health_check().await.is_ok()
    }
}
