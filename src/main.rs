//! Todo API - minimal todo CRUD service backed by MongoDB
//!
//! Accepts JSON requests over a small REST surface, validates minimally,
//! translates to document-store operations, and returns JSON responses.

mod config;
mod errors;
mod metrics;
mod model;
mod routes;
mod server;
mod storage;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::server::Server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment and optional config file
    let config = Config::from_env()?;

    // Initialize tracing with JSON output for structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Initialize Prometheus metrics
    crate::metrics::init_metrics();

    info!("Starting todo-api");
    info!(?config, "Configuration loaded");

    // Connect to the document store; unreachable storage is fatal here
    let store = storage::create_store(&config).await?;

    // Create and start the HTTP server
    let server = Server::new(config.clone(), store)?;

    // Handle graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    info!("Server starting on {}", config.server.bind_address);
    if let Err(e) = server.start(shutdown_signal).await {
        error!(error = %e, "Server error");
        return Err(e);
    }

    info!("Server shutdown complete");
    Ok(())
}
