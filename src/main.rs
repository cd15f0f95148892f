//! Trade Cost Simulator - Main binary
//!
//! Fetches a live order book on an interval and serves execution cost
//! estimates (slippage, fees, market impact, maker/taker probability) for a
//! hypothetical market buy over HTTP and WebSocket.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐  ingest   ┌───────────────────┐  read/update  ┌────────────────┐
//! │  RefreshLoop   │ ────────► │  SimulationState  │ ◄──────────── │  Axum server   │
//! │  (tokio task)  │           │  (Arc, one lock)  │ ────────────► │  (REST + WS)   │
//! └────────────────┘           └───────────────────┘  BroadcastHook└────────────────┘
//!         ▲                                                                │
//!         └────────────────────── Notify (early refresh) ◄──────────────────┘
//! ```
//!
//! Ctrl-C stops the server, then the refresh loop.

mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use feed::{OkxBookSource, RefreshLoop};
use server::{BroadcastHook, RESULT_CHANNEL_CAPACITY, ServerState, create_app};
use simulation::{SimulationState, validate_parameters};
use tokio::net::TcpListener;
use tokio::sync::{Notify, broadcast, watch};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

pub use config::AppConfig;

/// Trade Cost Simulator - live order book execution cost estimates
#[derive(Parser, Debug)]
#[command(name = "trade-cost-sim")]
#[command(about = "Estimate execution cost of a market order against a live order book")]
#[command(version)]
struct Args {
    /// Host to bind the HTTP server to
    #[arg(long, env = "SIM_HOST")]
    host: Option<String>,

    /// Port to bind the HTTP server to
    #[arg(long, env = "SIM_PORT")]
    port: Option<u16>,

    /// Delay between book fetches in milliseconds
    #[arg(long, env = "SIM_REFRESH_INTERVAL_MS")]
    refresh_interval_ms: Option<u64>,

    /// Book fetch timeout in milliseconds
    #[arg(long, env = "SIM_FETCH_TIMEOUT_MS")]
    fetch_timeout_ms: Option<u64>,

    /// Levels per side to request
    #[arg(long, env = "SIM_BOOK_DEPTH")]
    book_depth: Option<u32>,

    /// Exchange REST base URL
    #[arg(long, env = "SIM_BASE_URL")]
    base_url: Option<String>,

    /// Initial instrument
    #[arg(long, env = "SIM_INSTRUMENT")]
    instrument: Option<String>,
}

impl Args {
    /// Apply command-line overrides on top of the defaults.
    fn into_config(self) -> AppConfig {
        let mut config = AppConfig::default();
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(ms) = self.refresh_interval_ms {
            config = config.with_refresh_interval_ms(ms);
        }
        if let Some(ms) = self.fetch_timeout_ms {
            config = config.with_fetch_timeout_ms(ms);
        }
        if let Some(depth) = self.book_depth {
            config = config.with_book_depth(depth);
        }
        if let Some(url) = self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(instrument) = self.instrument {
            config = config.with_instrument(instrument);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config();
    validate_parameters(&config.params).context("invalid initial parameters")?;

    // Simulation state, publishing every result to WebSocket subscribers
    let (result_tx, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);
    let sim = Arc::new(
        SimulationState::new(config.params.clone())
            .with_latency_window(config.latency_window)
            .with_hook(Arc::new(BroadcastHook::new(result_tx.clone()))),
    );

    // Refresh loop
    let refresh = Arc::new(Notify::new());
    let source = OkxBookSource::new(config.okx_config()).context("failed to build http client")?;
    let refresh_loop = RefreshLoop::new(source, Arc::clone(&sim))
        .with_config(config.refresh_config())
        .with_notify(Arc::clone(&refresh));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let feed_task = tokio::spawn(refresh_loop.run(shutdown_rx));

    // Server
    let app = create_app(ServerState::new(sim, result_tx, refresh));
    let addr = config.server_config().bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        %addr,
        instrument = %config.params.instrument,
        base_url = %config.base_url,
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = feed_task.await {
        warn!(error = %e, "refresh loop task ended abnormally");
    }
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    info!("shutdown signal received");
}
