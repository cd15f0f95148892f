//! Market impact (simplified Almgren-Chriss).
//!
//! ```text
//! qty        = notional / best_ask
//! permanent  = eta   * qty
//! temporary  = gamma * qty^2 / total_ask_size
//! impact_pct = (permanent + temporary) * 100
//! ```
//!
//! Impact here is driven by book depth alone; volatility does not enter the
//! formula.

use types::BookSnapshot;

use crate::error::{InvalidData, is_positive};
use crate::model::Estimate;

/// Coefficients for the impact model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactCoefficients {
    /// Permanent impact per unit of base quantity.
    pub eta: f64,
    /// Temporary impact per unit of squared quantity over depth.
    pub gamma: f64,
}

impl Default for ImpactCoefficients {
    fn default() -> Self {
        Self {
            eta: 1e-6,
            gamma: 1e-5,
        }
    }
}

/// Estimate market impact in percent for a market buy of `order_quantity_quote`.
pub fn market_impact_pct(
    book: &BookSnapshot,
    order_quantity_quote: f64,
    coefficients: ImpactCoefficients,
) -> Estimate<f64> {
    let best_ask = match book.best_ask() {
        Some(price) => price,
        None => return Estimate::Invalid(InvalidData::EmptyAsks),
    };
    if !is_positive(best_ask) {
        return Estimate::Invalid(InvalidData::NonPositiveAskPrice(best_ask));
    }

    let qty = order_quantity_quote / best_ask;
    let avg_volume = book.total_ask_volume();
    if !is_positive(avg_volume) {
        return Estimate::Invalid(InvalidData::ZeroVolume);
    }

    let permanent = coefficients.eta * qty;
    let temporary = coefficients.gamma * qty.powi(2) / avg_volume;

    Estimate::Valid((permanent + temporary) * 100.0)
}
