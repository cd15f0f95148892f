//! `ResultHook` implementation that broadcasts results to the server.
//!
//! Bridges the synchronous state lock to async WebSocket handlers.
//!
//! # Architecture
//!
//! ```text
//! SimulationState (sync)     BroadcastHook           Server (async)
//!       │                         │                       │
//!       │── on_result() ─────────▶│                       │
//!       │                         │── result_tx.send() ──▶│
//!       │                         │                       │── ws broadcast
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use simulation::ResultHook;
use simulation::hooks::HookContext;
use tokio::sync::broadcast;
use types::SimulationResult;

/// Hook that forwards every published result on a broadcast channel.
pub struct BroadcastHook {
    result_tx: broadcast::Sender<SimulationResult>,
    published: AtomicU64,
}

impl BroadcastHook {
    pub fn new(result_tx: broadcast::Sender<SimulationResult>) -> Self {
        Self {
            result_tx,
            published: AtomicU64::new(0),
        }
    }

    /// Results seen since creation.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl ResultHook for BroadcastHook {
    fn name(&self) -> &str {
        "BroadcastHook"
    }

    fn on_result(&self, result: SimulationResult, _ctx: &HookContext) {
        self.published.fetch_add(1, Ordering::Relaxed);
        // No subscribers is fine.
        let _ = self.result_tx.send(result);
    }
}
