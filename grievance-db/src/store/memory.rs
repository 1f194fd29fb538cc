//! In-memory storage backend.
//!
//! Thread-safe maps behind an async `RwLock`, used by tests and local
//! development. Its test suite pins the store semantics both backends must
//! satisfy: initial history event, duplicate rejection, sticky
//! `resolved_at`, cumulative response blocks, normalized phone matching,
//! and listing order/cap.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use grievance_core::{
    canonical_phone_key, HistoryEvent, NewSubmission, Official, Submission, SubmissionType,
    Urgency, DEFAULT_STATUS, OFFICIAL_RESPONSE_DELIMITER, RESOLVED_STATUS,
};

use crate::error::{StoreError, StoreResult};
use crate::filter::{SubmissionFilter, MAX_RESULTS};
use crate::store::{OfficialDirectory, SubmissionStore};

/// In-memory submission store and official directory.
#[derive(Debug, Default)]
pub struct MemoryGrievanceStore {
    submissions: RwLock<HashMap<String, Submission>>,
    officials: RwLock<Vec<Official>>,
}

impl MemoryGrievanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all records.
    pub async fn clear(&self) {
        self.submissions.write().await.clear();
        self.officials.write().await.clear();
    }
}

#[async_trait]
impl SubmissionStore for MemoryGrievanceStore {
    async fn create(&self, new: &NewSubmission) -> StoreResult<Submission> {
        let kind = SubmissionType::parse(&new.kind)
            .ok_or_else(|| StoreError::Validation(format!("invalid type: {:?}", new.kind)))?;
        let urgency = Urgency::parse(&new.urgency)
            .ok_or_else(|| StoreError::Validation(format!("invalid urgency: {:?}", new.urgency)))?;
        let status = new
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STATUS)
            .to_string();

        let mut submissions = self.submissions.write().await;
        if submissions.contains_key(&new.id) {
            return Err(StoreError::DuplicateId(new.id.clone()));
        }

        let now = Utc::now();
        let submission = Submission {
            id: new.id.clone(),
            kind,
            name: new.name.clone(),
            phone: new.phone.clone(),
            email: new.email.clone(),
            department: new.department.clone(),
            category: new.category.clone(),
            taluk: new.taluk.clone(),
            firka: new.firka.clone(),
            village: new.village.clone(),
            description: new.description.clone(),
            urgency,
            status: status.clone(),
            photos: new.photos.clone(),
            history: vec![HistoryEvent {
                timestamp: now,
                status,
                response: None,
            }],
            timestamp: now,
            last_updated: now,
            resolved_at: None,
        };

        submissions.insert(new.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Submission>> {
        Ok(self.submissions.read().await.get(id).cloned())
    }

    async fn get_by_id_and_phone(
        &self,
        id: &str,
        phone: &str,
    ) -> StoreResult<Option<Submission>> {
        let key = canonical_phone_key(phone);
        let submissions = self.submissions.read().await;
        Ok(submissions
            .values()
            .find(|s| s.id.eq_ignore_ascii_case(id) && canonical_phone_key(&s.phone) == key)
            .cloned())
    }

    async fn list(&self, filter: &SubmissionFilter) -> StoreResult<Vec<Submission>> {
        let predicates = filter.predicates();
        let submissions = self.submissions.read().await;

        let mut matching: Vec<Submission> = submissions
            .values()
            .filter(|s| predicates.iter().all(|p| p.matches(s)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.last_updated
                .cmp(&a.last_updated)
                .then(b.timestamp.cmp(&a.timestamp))
        });
        matching.truncate(MAX_RESULTS);
        Ok(matching)
    }

    async fn transition_status(
        &self,
        id: &str,
        status: &str,
        response: Option<&str>,
    ) -> StoreResult<()> {
        let mut submissions = self.submissions.write().await;
        let submission = submissions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let now = Utc::now();
        submission.status = status.to_string();
        submission.last_updated = now;
        if let Some(response) = response {
            submission.description.push_str(OFFICIAL_RESPONSE_DELIMITER);
            submission.description.push_str(response);
        }
        submission.history.push(HistoryEvent {
            timestamp: now,
            status: status.to_string(),
            response: response.map(str::to_string),
        });
        if status == RESOLVED_STATUS {
            submission.resolved_at.get_or_insert(now);
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl OfficialDirectory for MemoryGrievanceStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Official>> {
        let officials = self.officials.read().await;
        Ok(officials.iter().find(|o| o.username == username).cloned())
    }

    async fn seed_official(&self, username: &str, password: &str) -> StoreResult<()> {
        let mut officials = self.officials.write().await;
        if officials.iter().any(|o| o.username == username) {
            return Ok(());
        }
        let id = officials.len() as i32 + 1;
        officials.push(Official {
            id,
            username: username.to_string(),
            password: password.to_string(),
        });
        Ok(())
    }
}
