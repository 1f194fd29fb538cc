//! Storage error types.

use thiserror::Error;

/// Errors surfaced by the submission store and official directory.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A field failed validation before reaching persisted state.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A submission with this id already exists.
    ///
    /// Not safe to retry blindly; the caller must deduplicate first.
    #[error("Duplicate submission id: {0}")]
    DuplicateId(String),

    /// The referenced submission does not exist.
    #[error("Submission not found: {0}")]
    NotFound(String),

    /// Underlying database fault, message carried verbatim.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Store result type.
pub type StoreResult<T> = Result<T, StoreError>;
