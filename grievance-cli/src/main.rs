//! Grievance CLI Entry Point
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.
//!
//! Usage:
//!   grievance init     - Initialize database schema and seed the official account
//!   grievance serve    - Start the grievance API server
//!   grievance health   - Ping the configured database

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grievance_api::{run_server, AppState, ServerConfig};
use grievance_db::{OfficialDirectory, PgGrievanceStore, SubmissionStore};

#[derive(Parser)]
#[command(name = "grievance")]
#[command(about = "District grievance record system CLI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema and seed the bootstrap official
    Init,

    /// Start the grievance API server (initializes schema first)
    Serve {
        /// Host to bind to (overrides GRIEVANCE_BIND_ADDR)
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ping the configured database
    Health,
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = ServerConfig::from_env();

    match cli.command {
        Commands::Init => {
            let store =
                PgGrievanceStore::connect(&config.database_url, config.require_db_tls).await?;
            store.init_schema().await?;
            store
                .seed_official(&config.seed_official_username, &config.seed_official_password)
                .await?;
            println!("Grievance schema initialized");
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.bind_addr = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            let state = AppState::connect(&config).await?;
            run_server(config, state).await?;
        }
        Commands::Health => {
            let store =
                PgGrievanceStore::connect(&config.database_url, config.require_db_tls).await?;
            store.health_check().await?;
            println!("Database reachable");
        }
    }

    Ok(())
}

/// Initialize logging with tracing
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "grievance_cli=debug,grievance_api=debug,grievance_db=debug,tower_http=debug"
    } else {
        "grievance_cli=info,grievance_api=info,grievance_db=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
