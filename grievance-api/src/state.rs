//! Application State
//!
//! Shared state for the grievance API service.

use std::sync::Arc;

use grievance_db::{
    OfficialDirectory, PgGrievanceStore, StoreResult, SubmissionService, SubmissionStore,
};

use crate::ServerConfig;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Submission lifecycle orchestrator
    pub submissions: Arc<SubmissionService>,
    /// Official account directory
    pub officials: Arc<dyn OfficialDirectory>,
    /// Configured DC/DM PIN
    pub dcdm_pin: Arc<str>,
}

impl AppState {
    /// Connect the production Postgres backend, initialize the schema, and
    /// seed the bootstrap official account.
    pub async fn connect(config: &ServerConfig) -> StoreResult<Self> {
        let store = Arc::new(
            PgGrievanceStore::connect(&config.database_url, config.require_db_tls).await?,
        );
        store.init_schema().await?;
        store
            .seed_official(&config.seed_official_username, &config.seed_official_password)
            .await?;

        Ok(Self::with_store(store, &config.dcdm_pin))
    }

    /// Build state around any backend implementing both storage traits.
    pub fn with_store<S>(store: Arc<S>, dcdm_pin: &str) -> Self
    where
        S: SubmissionStore + OfficialDirectory + 'static,
    {
        let submissions = Arc::new(SubmissionService::new(
            store.clone() as Arc<dyn SubmissionStore>
        ));
        Self {
            submissions,
            officials: store as Arc<dyn OfficialDirectory>,
            dcdm_pin: Arc::from(dcdm_pin),
        }
    }
}
