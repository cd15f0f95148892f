//! Shared server state.
//!
//! # Design Principles
//!
//! - **Declarative**: State is data, handlers extract what they need
//! - **Modular**: State independent of route logic
//! - **SoC**: State holds handles; `SimulationState` owns the data

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use simulation::SimulationState;
use tokio::sync::{Notify, broadcast};
use types::SimulationResult;

/// Capacity of the result broadcast channel. Slow WebSocket clients skip
/// ahead rather than block publication.
pub const RESULT_CHANNEL_CAPACITY: usize = 64;

/// Server-side counters.
#[derive(Debug, Default)]
pub struct ServerMetrics {
    ws_connections: AtomicU64,
    refresh_requests: AtomicU64,
}

impl ServerMetrics {
    pub fn ws_connect(&self) {
        self.ws_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn ws_disconnect(&self) {
        self.ws_connections.fetch_sub(1, Ordering::Relaxed);
    }

    /// Currently open WebSocket connections.
    pub fn ws_count(&self) -> u64 {
        self.ws_connections.load(Ordering::Relaxed)
    }

    /// Early refreshes requested since start.
    pub fn refresh_requests(&self) -> u64 {
        self.refresh_requests.load(Ordering::Relaxed)
    }
}

/// State shared by every handler.
#[derive(Clone)]
pub struct ServerState {
    /// The simulation.
    pub sim: Arc<SimulationState>,
    /// Published results, fed by `BroadcastHook`.
    pub result_tx: broadcast::Sender<SimulationResult>,
    /// Wakes the refresh loop early.
    pub refresh: Arc<Notify>,
    pub metrics: Arc<ServerMetrics>,
    start_time: Instant,
}

impl ServerState {
    pub fn new(
        sim: Arc<SimulationState>,
        result_tx: broadcast::Sender<SimulationResult>,
        refresh: Arc<Notify>,
    ) -> Self {
        Self {
            sim,
            result_tx,
            refresh,
            metrics: Arc::new(ServerMetrics::default()),
            start_time: Instant::now(),
        }
    }

    /// Subscribe to published results.
    pub fn subscribe_results(&self) -> broadcast::Receiver<SimulationResult> {
        self.result_tx.subscribe()
    }

    /// Ask the refresh loop for a fetch now. Coalesces while one is pending.
    pub fn request_refresh(&self) {
        self.metrics.refresh_requests.fetch_add(1, Ordering::Relaxed);
        self.refresh.notify_one();
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
