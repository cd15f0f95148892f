//! Periodic refresh loop.
//!
//! Each cycle: read the active instrument, fetch outside the state lock,
//! then hand the book (or the failure) to `SimulationState`. Cycles run every
//! `interval`, or earlier when the shared [`Notify`] fires.

use std::sync::Arc;
use std::time::{Duration, Instant};

use simulation::{SimulationState, build_snapshot};
use tokio::sync::{Notify, watch};
use tracing::{debug, info, warn};
use types::{ResultState, now_ms};

use crate::source::BookSource;

/// Refresh loop timing.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Delay between cycles.
    pub interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

impl RefreshConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Keeps `SimulationState` fed from a [`BookSource`].
pub struct RefreshLoop<S> {
    source: S,
    state: Arc<SimulationState>,
    config: RefreshConfig,
    wake: Arc<Notify>,
}

impl<S: BookSource> RefreshLoop<S> {
    pub fn new(source: S, state: Arc<SimulationState>) -> Self {
        Self {
            source,
            state,
            config: RefreshConfig::default(),
            wake: Arc::new(Notify::new()),
        }
    }

    pub fn with_config(mut self, config: RefreshConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing notifier (e.g. the server's) for early refreshes.
    pub fn with_notify(mut self, wake: Arc<Notify>) -> Self {
        self.wake = wake;
        self
    }

    /// Handle that triggers an early refresh via `notify_one()`.
    pub fn notifier(&self) -> Arc<Notify> {
        Arc::clone(&self.wake)
    }

    /// Run one fetch and ingest cycle. Never fails; errors degrade the result.
    pub async fn refresh_once(&self) -> ResultState {
        let instrument = self.state.instrument();
        let started = Instant::now();

        match self.source.fetch(&instrument).await {
            Ok(raw) => {
                let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
                let captured_at = raw.exchange_ts.unwrap_or_else(now_ms);
                let book = build_snapshot(&instrument, &raw.bids, &raw.asks, captured_at);
                debug!(
                    source = self.source.name(),
                    %instrument,
                    bids = book.bids.len(),
                    asks = book.asks.len(),
                    latency_ms,
                    "book fetched"
                );
                self.state.ingest_book(book, latency_ms)
            }
            Err(err) => {
                warn!(
                    source = self.source.name(),
                    %instrument,
                    error = %err,
                    timeout = err.is_timeout(),
                    "failed to fetch orderbook"
                );
                self.state.ingest_failure()
            }
        }
    }

    /// Run until `shutdown` becomes `true` or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            source = self.source.name(),
            interval_ms = self.config.interval.as_millis() as u64,
            "refresh loop started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }
            self.refresh_once().await;

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = self.wake.notified() => {
                    debug!("early refresh requested");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("refresh loop stopped");
    }
}
