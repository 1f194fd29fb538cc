//! Grievance Persistence Layer
//!
//! Storage for submission records and official accounts. The layer is a
//! trait seam with two backends:
//!
//! - [`PgGrievanceStore`] - Postgres via a pooled sqlx connection, the
//!   production backend. All SQL is runtime-checked and parameterized.
//! - [`MemoryGrievanceStore`] - in-memory maps behind an async `RwLock`,
//!   used by tests and local development.
//!
//! The [`SubmissionService`] orchestrator sits on top of the store trait and
//! implements the citizen/official operations: file, search, track, fetch,
//! and status transition with its append-only history ledger.

pub mod error;
pub mod filter;
pub mod schema;
pub mod services;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use filter::{FilterField, FilterOp, Predicate, SubmissionFilter, MAX_RESULTS};
pub use schema::GRIEVANCE_SCHEMA;
pub use services::SubmissionService;
pub use store::{
    memory::MemoryGrievanceStore, postgres::PgGrievanceStore, OfficialDirectory, SubmissionStore,
};
