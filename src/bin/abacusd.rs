//! abacusd — Abacus calculator daemon.
//!
//! Serves `calculator.v1.CalculatorService` over gRPC, gRPC-Web and
//! Connect JSON on a single port.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use abacus::Calculator;
use abacus::server::config::Config;

/// Abacus daemon — arithmetic over RPC.
#[derive(Parser)]
#[command(name = "abacusd")]
#[command(version = abacus::PKG_VERSION)]
#[command(about = "Abacus calculator daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Listen address, overriding the configuration file.
    #[arg(short, long, env = "ABACUSD_ADDRESS")]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: info for the daemon; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }

    let listener = abacus::server::bind(&config.server.address).await?;
    info!(
        version = abacus::version_string(),
        address = %config.server.address,
        "abacusd starting"
    );

    abacus::server::serve(&config, Arc::new(Calculator::new()), listener, shutdown_signal())
        .await?;

    info!("abacusd stopped");
    Ok(())
}

/// Resolve on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c; shutting down");
    }
}
