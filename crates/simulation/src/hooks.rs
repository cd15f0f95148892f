//! Result hooks: observers notified whenever a new result is published.
//!
//! Hooks are **observers**. They receive owned copies of the result and a
//! small context and cannot modify simulation state.
//!
//! # Design Principles
//!
//! - **Declarative**: Hooks opt into events by overriding trait methods
//! - **Modular**: Each hook is independent; add/remove without touching state
//! - **SoC**: `SimulationState` owns data; hooks observe and forward
//!
//! Hooks run inside the state's critical section so that they observe results
//! in publication order. They must not block and must not call back into
//! `SimulationState`.
//!
//! # Example
//!
//! ```ignore
//! use simulation::hooks::{HookContext, ResultHook};
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! struct ResultCounter {
//!     count: AtomicU64,
//! }
//!
//! impl ResultHook for ResultCounter {
//!     fn name(&self) -> &str { "ResultCounter" }
//!
//!     fn on_result(&self, _result: types::SimulationResult, _ctx: &HookContext) {
//!         self.count.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//! ```

use types::{ParameterSet, SimulationResult, Timestamp};

// ─────────────────────────────────────────────────────────────────────────────
// Hook Context
// ─────────────────────────────────────────────────────────────────────────────

/// Owned snapshot of the inputs behind a published result.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Parameters the result was computed with.
    pub params: ParameterSet,
    /// Best bid of the book used, if any.
    pub best_bid: Option<f64>,
    /// Best ask of the book used, if any.
    pub best_ask: Option<f64>,
    /// Capture time of the book used.
    pub book_captured_at: Timestamp,
}

// ─────────────────────────────────────────────────────────────────────────────
// Hook Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Observer of published results.
///
/// All methods have no-op defaults.
pub trait ResultHook: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Called after every recompute with the newly published result.
    fn on_result(&self, _result: SimulationResult, _ctx: &HookContext) {}

    /// Called after a parameter update is accepted, before the recompute.
    fn on_parameters_changed(&self, _params: ParameterSet) {}
}
