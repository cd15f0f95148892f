//! Invalid-data signals raised by the cost components.

use thiserror::Error;

/// Why a cost component could not be computed from the book/parameters.
///
/// These are diagnostics, not failures: each one maps to a zeroed metric.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidData {
    /// The ask side has no levels.
    #[error("ask side is empty")]
    EmptyAsks,
    /// The bid side has no levels.
    #[error("bid side is empty")]
    EmptyBids,
    /// Best ask is zero, negative, or not a number.
    #[error("invalid ask price: {0} (zero or negative)")]
    NonPositiveAskPrice(f64),
    /// Mid price is zero, negative, or not a number.
    #[error("invalid mid price: {0} (zero or negative)")]
    NonPositiveMidPrice(f64),
    /// Order notional is zero, negative, or not a number.
    #[error("invalid order quantity: {0} (zero or negative)")]
    NonPositiveQuantity(f64),
    /// Total resting ask size is zero.
    #[error("zero volume in orderbook")]
    ZeroVolume,
    /// Volatility is zero, negative, or not a number.
    #[error("invalid volatility: {0} (zero or negative)")]
    NonPositiveVolatility(f64),
}

/// Strictly positive and not NaN.
pub(crate) fn is_positive(value: f64) -> bool {
    value > 0.0
}
