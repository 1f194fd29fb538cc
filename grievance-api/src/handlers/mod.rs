//! HTTP handlers.

pub mod auth;
pub mod health;
pub mod submissions;

pub use auth::{dcdm_login, official_login};
pub use health::health_check;
pub use submissions::{
    create_submission, get_submission, list_submissions, lookup_submission, update_status,
};
