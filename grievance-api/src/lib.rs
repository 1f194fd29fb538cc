//! Grievance REST API Layer
//!
//! HTTP JSON API for the district grievance record system.
//!
//! # Endpoints
//!
//! ## Health
//! - `GET /health` - Health check (always 200; `dbOk` reports the database)
//!
//! ## Submissions
//! - `POST /api/submissions` - File a complaint or petition
//! - `GET /api/submissions` - List with optional filters and free text `q`
//! - `GET /api/submissions/lookup` - Anonymous tracking by id + phone
//! - `GET /api/submissions/:id` - Fetch one submission
//! - `POST /api/submissions/:id/status` - Official status transition
//!
//! ## Auth
//! - `POST /api/auth/dcdm` - DC/DM PIN login (stateless)
//! - `POST /api/auth/official` - Official username/password login
//!
//! Every response carries `Cache-Control: no-store` so officials always see
//! fresh status.
//!
//! # Usage
//!
//! ```ignore
//! use grievance_api::{run_server, AppState, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = ServerConfig::from_env();
//!     let state = AppState::connect(&config).await?;
//!     run_server(config, state).await
//! }
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::create_router;
pub use server::{create_server, run_server, start_background_server};
pub use state::AppState;

/// API version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the grievance API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub bind_addr: String,
    /// Port
    pub port: u16,
    /// Database connection string
    pub database_url: String,
    /// Force encrypted transport to the database
    pub require_db_tls: bool,
    /// PIN accepted by the DC/DM login
    pub dcdm_pin: String,
    /// Bootstrap official account, seeded if absent
    pub seed_official_username: String,
    /// Bootstrap official password
    pub seed_official_password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            database_url: "postgres://localhost:5432/grievance".to_string(),
            require_db_tls: false,
            dcdm_pin: "qdguckebg461293".to_string(),
            seed_official_username: "Tenkasi Admin".to_string(),
            seed_official_password: "efvhuytgbnmki493401".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("GRIEVANCE_BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            require_db_tls: std::env::var("PGSSLMODE")
                .map(|m| m == "require")
                .unwrap_or(false),
            dcdm_pin: std::env::var("DCDM_PIN").unwrap_or(defaults.dcdm_pin),
            seed_official_username: std::env::var("SEED_OFFICIAL_USERNAME")
                .unwrap_or(defaults.seed_official_username),
            seed_official_password: std::env::var("SEED_OFFICIAL_PASSWORD")
                .unwrap_or(defaults.seed_official_password),
        }
    }

    /// Get the full bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
