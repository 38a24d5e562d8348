//! Virtual TA server binary
//!
//! Run with: cargo run -p tds-virtual-ta --bin tds-virtual-ta-server

use clap::Parser;
use std::path::PathBuf;
use tds_virtual_ta::{config::VirtualTaConfig, server::VirtualTaServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// TDS Virtual TA HTTP server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "TDS_TA_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tds_virtual_ta=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = VirtualTaConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!(
        "  - LLM API key: {}",
        if config.llm.api_key().is_some() { "set" } else { "not set (rule-based answers only)" }
    );
    tracing::info!(
        "  - Throttle: {}s between calls",
        config.throttle.min_interval_secs
    );

    let server = VirtualTaServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}/api/", server.address());
    println!("  Health: http://{}/api/health/", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/         - Ask a question");
    println!("  GET  /api/info/    - Service info");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
