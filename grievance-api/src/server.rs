//! API Server setup

use axum::http::{header, HeaderValue};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::router::create_router;
use crate::state::AppState;
use crate::ServerConfig;

/// Create the API server router
///
/// Every response is stamped `Cache-Control: no-store` so officials always
/// see fresh status; CORS is permissive because the citizen frontend is a
/// separately hosted browser app.
pub fn create_server(state: AppState) -> Router {
    create_router(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_server(
    config: ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let router = create_server(state);
    let addr: SocketAddr = config.bind_address().parse()?;

    tracing::info!("grievance API server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Start server in background (for testing)
pub async fn start_background_server(
    state: AppState,
) -> Result<SocketAddr, Box<dyn std::error::Error + Send + Sync>> {
    let router = create_server(state);

    // Bind to an ephemeral port and report the actual address
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let actual_addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}
