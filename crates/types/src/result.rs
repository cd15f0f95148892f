//! Simulation result published to clients.

use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// Which branch of the recomputation produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResultState {
    /// Book is empty on at least one side; all cost fields are zero.
    #[default]
    NoData,
    /// Order is larger than visible ask depth; slippage is zero, the other
    /// components are still meaningful.
    InsufficientLiquidity,
    /// Full computation. A component that hit invalid data is zeroed and
    /// named in the warning, but the state stays `Ok`.
    Ok,
}

/// Estimated execution cost of the hypothetical order.
///
/// Always fully replaced by a recompute, never patched field by field.
///
/// Percentages are of the order notional. `net_cost_quote` sums the
/// quote-currency components: `slippage_quote + fees_quote + market_impact_quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationResult {
    /// Result branch.
    pub state: ResultState,
    /// Signed slippage of the average fill vs. mid, in percent.
    pub slippage_pct: f64,
    /// Slippage converted to quote currency.
    pub slippage_quote: f64,
    /// Taker fees in quote currency.
    pub fees_quote: f64,
    /// Market impact in percent.
    pub market_impact_pct: f64,
    /// Market impact converted to quote currency.
    pub market_impact_quote: f64,
    /// Total estimated cost in quote currency.
    pub net_cost_quote: f64,
    /// Probability of passive (maker) execution, 0 to 100.
    pub maker_probability_pct: f64,
    /// Latency of the fetch that produced the current book; 0.0 for `NoData`.
    pub fetch_latency_ms: f64,
    /// Set exactly when the computation could not fully execute.
    pub warning: Option<String>,
    /// Capture time of the book this result was computed from.
    pub book_captured_at: Timestamp,
}

impl SimulationResult {
    /// A result in the `NoData` state with every numeric field zeroed.
    pub fn no_data(warning: impl Into<String>, book_captured_at: Timestamp) -> Self {
        Self {
            state: ResultState::NoData,
            warning: Some(warning.into()),
            book_captured_at,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_is_zeroed() {
        let result = SimulationResult::no_data("no orderbook data", 7);
        assert_eq!(result.state, ResultState::NoData);
        assert_eq!(result.slippage_pct, 0.0);
        assert_eq!(result.fees_quote, 0.0);
        assert_eq!(result.market_impact_pct, 0.0);
        assert_eq!(result.net_cost_quote, 0.0);
        assert_eq!(result.maker_probability_pct, 0.0);
        assert_eq!(result.fetch_latency_ms, 0.0);
        assert_eq!(result.book_captured_at, 7);
        assert_eq!(result.warning.as_deref(), Some("no orderbook data"));
    }

    #[test]
    fn test_result_serialization() {
        let result = SimulationResult {
            state: ResultState::InsufficientLiquidity,
            fees_quote: 1.0,
            ..Default::default()
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"state\":\"insufficient_liquidity\""));
        assert!(json.contains("\"fees_quote\":1.0"));
        assert!(json.contains("\"warning\":null"));
    }
}
