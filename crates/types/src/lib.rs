//! Core types for the trade cost simulator.
//!
//! This crate provides all shared data types used across the workspace:
//! order book snapshots, the user-tunable parameter set, and the
//! simulation result published to clients.

mod latency;
mod market_data;
mod params;
mod result;

pub use latency::LatencyStats;
pub use market_data::{BookSnapshot, PriceLevel};
pub use params::{FeeTier, OrderType, ParameterSet, ParameterUpdate};
pub use result::{ResultState, SimulationResult};

use std::time::{SystemTime, UNIX_EPOCH};

// =============================================================================
// Identifier / Time Types
// =============================================================================

/// Instrument identifier as the exchange spells it (e.g., "BTC-USDT-SWAP").
pub type Instrument = String;

/// Wall clock timestamp in milliseconds since epoch.
pub type Timestamp = u64;

/// Current wall clock time in milliseconds since epoch.
///
/// Returns 0 if the system clock is set before the epoch.
pub fn now_ms() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(now_ms() > 1_577_836_800_000);
    }
}
