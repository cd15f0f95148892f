//! Simulation: the shared state between the book feed and the HTTP surface.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐ ingest_book()      ┌─────────────────────┐
//! │ RefreshLoop  │──────────────────▶ │  SimulationState    │
//! └──────────────┘                    │  (one Mutex)        │
//!                                     │   book              │
//! ┌──────────────┐ update_parameters()│   params            │──▶ ResultHook(s)
//! │ HTTP server  │──────────────────▶ │   result            │
//! │              │◀────────────────── │                     │
//! └──────────────┘ current_result()   └─────────────────────┘
//! ```
//!
//! Replacing the book or the parameters and recomputing the result happen in
//! one critical section, so readers never see a result that mixes an old book
//! with new parameters.
//!
//! # Modules
//!
//! - [`state`]: [`SimulationState`] and the recompute rules
//! - [`ingest`]: raw `[price, size, ...]` entries to validated levels
//! - [`validation`]: parameter validation ([`ValidationError`])
//! - [`hooks`]: observers notified on every published result
//! - [`latency`]: bounded window of fetch latencies

pub mod hooks;
pub mod ingest;
pub mod latency;
pub mod state;
pub mod validation;

pub use hooks::ResultHook;
pub use ingest::{RawLevel, build_snapshot, parse_levels};
pub use latency::LatencyWindow;
pub use state::{
    FETCH_FAILED_WARNING, INSUFFICIENT_LIQUIDITY_WARNING, NO_DATA_WARNING, SimulationState,
    StateSnapshot,
};
pub use validation::{ValidationError, validate_parameters};
