//! Model Gateway
//!
//! A stateless JSON forwarding gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │              FORWARDING GATEWAY               │
//!                     │                                               │
//!   Client Request    │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!   ──────────────────┼─▶│  http   │───▶│ validate │───▶│upstream │──┼──▶ Model
//!                     │  │ server  │    │  fields  │    │ client  │  │    Server
//!                     │  └─────────┘    └──────────┘    └────┬────┘  │
//!                     │                                      │       │
//!   Client Response   │  ┌─────────┐                         │       │
//!   ◀─────────────────┼──│  relay  │◀────────────────────────┘       │
//!                     │  │verbatim │                                  │
//!                     │  └─────────┘                                  │
//!                     │                                               │
//!                     │  ┌─────────────────────────────────────────┐ │
//!                     │  │          Cross-Cutting Concerns          │ │
//!                     │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                     │  │  │ config │ │observability│ │ errors  │ │ │
//!                     │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                     │  └─────────────────────────────────────────┘ │
//!                     └──────────────────────────────────────────────┘
//! ```
//!
//! Per-request flow is strictly linear: receive → validate → forward → relay.
//! Validation failures short-circuit to 400 before any upstream call; upstream
//! failures collapse to 500 with an error envelope.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use model_gateway::config::loader::load_config;
use model_gateway::http::HttpServer;
use model_gateway::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "model-gateway")]
#[command(about = "JSON forwarding gateway for the model server", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. Environment variables
    /// (PYTHON_SERVICE_URL, PORT) override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_base_url = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics server
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            model_gateway::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
