//! Merchant Travel Platform Edge (v1)
//!
//! The edge tier in front of the merchant-facing travel platform, built
//! with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌───────────────────────────────────────────────┐
//!                       │                  EDGE TIER                     │
//!                       │                                                │
//!     Client Request    │  ┌─────────┐    ┌──────────┐    ┌──────────┐  │
//!     ──────────────────┼─▶│  http   │───▶│ routing  │───▶│ decision │  │
//!                       │  │ server  │    │  policy  │    └────┬─────┘  │
//!                       │  └─────────┘    └──────────┘         │        │
//!                       │                                      ▼        │
//!                       │        Pass ──▶ forward to rendering origin   │
//!                       │        Redirect ──▶ 301 to canonical origin   │
//!                       │        Robots ──▶ synthesized crawler policy  │
//!                       │                                                │
//!                       │  ┌──────────────────────────────────────────┐ │
//!                       │  │          Cross-Cutting Concerns           │ │
//!                       │  │  ┌────────┐ ┌─────────────┐ ┌──────────┐ │ │
//!                       │  │  │ config │ │observability│ │lifecycle │ │ │
//!                       │  │  │+reload │ │ logs+metrics│ │ shutdown │ │ │
//!                       │  │  └────────┘ └─────────────┘ └──────────┘ │ │
//!                       │  └──────────────────────────────────────────┘ │
//!                       └───────────────────────────────────────────────┘
//! ```
//!
//! The session auth gate lives in the library (`session` module); it runs
//! inside the platform's interactive client, not in this binary.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use merchant_edge::config::{load_config, ConfigWatcher, EdgeConfig};
use merchant_edge::http::EdgeServer;
use merchant_edge::lifecycle::Shutdown;
use merchant_edge::observability;

#[derive(Parser)]
#[command(name = "merchant-edge")]
#[command(about = "Canonical-host edge tier for the merchant travel platform", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    observability::logging::init(&config.observability);

    tracing::info!("merchant-edge v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        canonical_origin = %config.policy.canonical_origin,
        upstream = %config.upstream.address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Hot reload: watch the config file when one was given.
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let _watcher = match &cli.config {
        Some(path) => Some(ConfigWatcher::new(path, config_tx).run()?),
        None => None,
    };

    let shutdown = Shutdown::new();
    shutdown.listen_for_ctrl_c();

    let server = EdgeServer::new(config)?;
    server
        .run(listener, config_updates, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
