//! Shared simulation state.
//!
//! # Design Principles
//!
//! - **One lock**: book, parameters, latest result and latency window live in
//!   a single `parking_lot::Mutex`. "Replace + recompute + publish" is one
//!   critical section.
//! - **Pure recompute**: the published result is a function of
//!   `(book, parameters)` plus the fetch status; nothing is patched in place,
//!   and recomputing unchanged inputs yields an identical result.
//! - **Fetch outside the lock**: callers parse and fetch first, then hand a
//!   finished [`BookSnapshot`] in.

use std::sync::Arc;

use cost_model::{CostModel, SlippageOutcome};
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use types::{
    BookSnapshot, LatencyStats, ParameterSet, ParameterUpdate, ResultState, SimulationResult,
    now_ms,
};

use crate::hooks::{HookContext, ResultHook};
use crate::ingest::{RawLevel, build_snapshot};
use crate::latency::LatencyWindow;
use crate::validation::{ValidationError, validate_parameters};

// ─────────────────────────────────────────────────────────────────────────────
// Warnings
// ─────────────────────────────────────────────────────────────────────────────

/// Warning when either side of the book is empty.
pub const NO_DATA_WARNING: &str = "no orderbook data";

/// Warning when the last fetch failed.
pub const FETCH_FAILED_WARNING: &str = "failed to fetch orderbook";

/// Warning when the order is larger than the visible ask depth.
pub const INSUFFICIENT_LIQUIDITY_WARNING: &str = "order quantity exceeds available liquidity";

// ─────────────────────────────────────────────────────────────────────────────
// State
// ─────────────────────────────────────────────────────────────────────────────

/// Consistent view of book, parameters and result taken under one lock.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub book: Arc<BookSnapshot>,
    pub params: ParameterSet,
    pub result: SimulationResult,
}

struct Inner {
    book: Arc<BookSnapshot>,
    params: ParameterSet,
    result: SimulationResult,
    fetch_failed: bool,
    fetch_latency_ms: f64,
    latencies: LatencyWindow,
}

/// The single shared simulation state.
///
/// Wrap in `Arc` and hand clones to the refresh loop and the server.
pub struct SimulationState {
    inner: Mutex<Inner>,
    model: CostModel,
    hooks: Vec<Arc<dyn ResultHook>>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(ParameterSet::default())
    }
}

impl SimulationState {
    /// Create state with the given initial parameters and an empty book.
    ///
    /// The initial result is `NoData`.
    pub fn new(params: ParameterSet) -> Self {
        let book = Arc::new(BookSnapshot::empty(params.instrument.clone(), 0));
        let result = SimulationResult::no_data(NO_DATA_WARNING, book.captured_at);
        Self {
            inner: Mutex::new(Inner {
                book,
                params,
                result,
                fetch_failed: false,
                fetch_latency_ms: 0.0,
                latencies: LatencyWindow::default(),
            }),
            model: CostModel::default(),
            hooks: Vec::new(),
        }
    }

    /// Use a specific cost model.
    pub fn with_model(mut self, model: CostModel) -> Self {
        self.model = model;
        self
    }

    /// Use a latency window of the given capacity.
    pub fn with_latency_window(self, capacity: usize) -> Self {
        self.inner.lock().latencies = LatencyWindow::with_capacity(capacity);
        self
    }

    /// Register a hook. Hooks are fixed once the state is shared.
    pub fn with_hook(mut self, hook: Arc<dyn ResultHook>) -> Self {
        debug!(hook = hook.name(), "result hook registered");
        self.hooks.push(hook);
        self
    }

    // ===== Writers =====

    /// Ingest raw bid and ask entries for the current instrument.
    ///
    /// Invalid entries are dropped. Returns the state of the new result.
    pub fn ingest_snapshot(
        &self,
        raw_bids: &[RawLevel],
        raw_asks: &[RawLevel],
        fetch_latency_ms: f64,
    ) -> ResultState {
        let instrument = self.instrument();
        let book = build_snapshot(&instrument, raw_bids, raw_asks, now_ms());
        self.ingest_book(book, fetch_latency_ms)
    }

    /// Replace the book with an already built snapshot and recompute.
    ///
    /// A snapshot for an instrument other than the active one is stale (the
    /// parameters changed while the fetch was in flight) and is discarded.
    pub fn ingest_book(&self, book: BookSnapshot, fetch_latency_ms: f64) -> ResultState {
        let mut inner = self.inner.lock();
        if book.instrument != inner.params.instrument {
            debug!(
                got = %book.instrument,
                active = %inner.params.instrument,
                "discarding snapshot for inactive instrument"
            );
            return inner.result.state;
        }

        inner.book = Arc::new(book);
        inner.fetch_failed = false;
        inner.fetch_latency_ms = fetch_latency_ms;
        inner.latencies.record(fetch_latency_ms);
        self.recompute_locked(&mut inner)
    }

    /// Record a failed fetch: the book is emptied and the result carries the
    /// fetch-failed warning.
    pub fn ingest_failure(&self) -> ResultState {
        let mut inner = self.inner.lock();
        inner.book = Arc::new(BookSnapshot::empty(inner.params.instrument.clone(), now_ms()));
        inner.fetch_failed = true;
        inner.fetch_latency_ms = 0.0;
        self.recompute_locked(&mut inner)
    }

    /// Merge, validate and apply a parameter update, then recompute.
    ///
    /// On error the active parameters are unchanged. Switching instrument
    /// clears the book until the next fetch for the new instrument.
    pub fn update_parameters(&self, update: ParameterUpdate) -> Result<ParameterSet, ValidationError> {
        let mut inner = self.inner.lock();
        let candidate = update.apply_to(&inner.params);
        if let Err(err) = validate_parameters(&candidate) {
            warn!(error = %err, "parameter update rejected");
            return Err(err);
        }

        if candidate.instrument != inner.params.instrument {
            info!(
                from = %inner.params.instrument,
                to = %candidate.instrument,
                "instrument changed, clearing book"
            );
            inner.book = Arc::new(BookSnapshot::empty(candidate.instrument.clone(), now_ms()));
            inner.fetch_failed = false;
        }
        inner.params = candidate.clone();
        info!(
            instrument = %candidate.instrument,
            quantity = candidate.order_quantity_quote,
            volatility = candidate.volatility,
            fee_tier = %candidate.fee_tier,
            "parameters updated"
        );

        for hook in &self.hooks {
            hook.on_parameters_changed(candidate.clone());
        }
        self.recompute_locked(&mut inner);
        Ok(candidate)
    }

    /// Recompute the result from the current book and parameters.
    pub fn recompute(&self) -> ResultState {
        let mut inner = self.inner.lock();
        self.recompute_locked(&mut inner)
    }

    // ===== Readers =====

    /// Latest published result.
    pub fn current_result(&self) -> SimulationResult {
        self.inner.lock().result.clone()
    }

    /// Active parameters.
    pub fn current_parameters(&self) -> ParameterSet {
        self.inner.lock().params.clone()
    }

    /// Book the latest result was computed from.
    pub fn current_book(&self) -> Arc<BookSnapshot> {
        Arc::clone(&self.inner.lock().book)
    }

    /// Active instrument.
    pub fn instrument(&self) -> String {
        self.inner.lock().params.instrument.clone()
    }

    /// True if either side of the current book is empty.
    pub fn book_is_empty(&self) -> bool {
        self.inner.lock().book.is_empty()
    }

    /// Book, parameters and result read together.
    pub fn snapshot(&self) -> StateSnapshot {
        let inner = self.inner.lock();
        StateSnapshot {
            book: Arc::clone(&inner.book),
            params: inner.params.clone(),
            result: inner.result.clone(),
        }
    }

    /// Summary of recent successful fetch latencies.
    pub fn latency_stats(&self) -> LatencyStats {
        self.inner.lock().latencies.stats()
    }

    // ===== Recompute =====

    fn recompute_locked(&self, inner: &mut Inner) -> ResultState {
        let previous = inner.result.state;
        let result = self.derive_result(inner);

        if result.state != previous {
            match result.state {
                ResultState::Ok => info!(state = ?result.state, "result available"),
                _ => warn!(
                    state = ?result.state,
                    warning = result.warning.as_deref().unwrap_or_default(),
                    "result degraded"
                ),
            }
        }

        inner.result = result;
        if !self.hooks.is_empty() {
            let ctx = HookContext {
                params: inner.params.clone(),
                best_bid: inner.book.best_bid(),
                best_ask: inner.book.best_ask(),
                book_captured_at: inner.book.captured_at,
            };
            for hook in &self.hooks {
                hook.on_result(inner.result.clone(), &ctx);
            }
        }
        inner.result.state
    }

    fn derive_result(&self, inner: &Inner) -> SimulationResult {
        let book_captured_at = inner.book.captured_at;

        if inner.book.is_empty() {
            let warning = if inner.fetch_failed {
                FETCH_FAILED_WARNING
            } else {
                NO_DATA_WARNING
            };
            return SimulationResult::no_data(warning, book_captured_at);
        }

        let params = &inner.params;
        let notional = params.order_quantity_quote;
        let report = self.model.compute(&inner.book, params);

        let diagnostics = report.diagnostics();
        for (component, reason) in &diagnostics {
            warn!(component, %reason, "invalid data, component zeroed");
        }

        let market_impact_pct = report.market_impact_pct.value_or_zero();
        let market_impact_quote = market_impact_pct / 100.0 * notional;
        let maker_probability_pct = report.maker_probability_pct.value_or_zero();
        let fees_quote = report.fees_quote;

        let (state, slippage_pct, warning) = match report.slippage {
            SlippageOutcome::InsufficientLiquidity { .. } => (
                ResultState::InsufficientLiquidity,
                0.0,
                Some(INSUFFICIENT_LIQUIDITY_WARNING.to_string()),
            ),
            SlippageOutcome::Filled(fill) => (ResultState::Ok, fill.slippage_pct, None),
            SlippageOutcome::Invalid(_) => (ResultState::Ok, 0.0, None),
        };
        let warning = warning.or_else(|| {
            diagnostics
                .first()
                .map(|(component, reason)| format!("invalid data in {component}: {reason}"))
        });

        let slippage_quote = slippage_pct / 100.0 * notional;
        let net_cost_quote = slippage_quote + fees_quote + market_impact_quote;

        SimulationResult {
            state,
            slippage_pct,
            slippage_quote,
            fees_quote,
            market_impact_pct,
            market_impact_quote,
            net_cost_quote,
            maker_probability_pct,
            fetch_latency_ms: inner.fetch_latency_ms,
            warning,
            book_captured_at,
        }
    }
}
