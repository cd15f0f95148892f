//! Slippage via liquidity walk.
//!
//! Simulates a market buy of `order_quantity_quote` notional against the ask
//! ladder and measures how far the volume-weighted fill price lands from the
//! pre-trade mid.
//!
//! # Algorithm
//!
//! 1. `qty = notional / best_ask` (base units)
//! 2. If `qty` exceeds total ask size, the order cannot fill
//! 3. Consume `min(remaining, level.size)` from each level, best price first
//! 4. `avg = cost / qty`, `slippage_pct = (avg - mid) / mid * 100`
//!
//! The sign is kept: positive means the buy paid above mid.

use serde::Serialize;
use types::BookSnapshot;

use crate::error::{InvalidData, is_positive};

/// Relative tolerance for "fully filled" after the walk.
///
/// Summing level sizes and subtracting them again can leave a remainder of a
/// few ULPs on an order that exactly matches the visible depth.
const FILL_EPSILON: f64 = 1e-12;

/// Result of walking the ask ladder for a fully filled order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillSummary {
    /// Base quantity bought.
    pub filled_qty: f64,
    /// Volume-weighted average fill price.
    pub avg_fill_price: f64,
    /// Pre-trade mid price.
    pub mid_price: f64,
    /// Number of ask levels touched by the walk.
    pub levels_consumed: usize,
    /// Signed slippage in percent of mid.
    pub slippage_pct: f64,
}

/// Outcome of the slippage computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlippageOutcome {
    /// The walk filled the whole order.
    Filled(FillSummary),
    /// The order is larger than the visible ask depth.
    InsufficientLiquidity {
        /// Base quantity the order needs.
        required: f64,
        /// Base quantity resting on the asks.
        available: f64,
    },
    /// The book or parameters did not allow a computation.
    Invalid(InvalidData),
}

impl SlippageOutcome {
    /// Slippage in percent, or 0.0 for any non-filled outcome.
    pub fn slippage_pct(&self) -> f64 {
        match self {
            SlippageOutcome::Filled(fill) => fill.slippage_pct,
            _ => 0.0,
        }
    }

    /// True if the order could not be filled from visible depth.
    pub fn is_insufficient_liquidity(&self) -> bool {
        matches!(self, SlippageOutcome::InsufficientLiquidity { .. })
    }
}

/// Walk the ask ladder for a market buy of `order_quantity_quote` notional.
pub fn walk_asks(book: &BookSnapshot, order_quantity_quote: f64) -> SlippageOutcome {
    let best_ask = match book.best_ask() {
        Some(price) => price,
        None => return SlippageOutcome::Invalid(InvalidData::EmptyAsks),
    };
    if !is_positive(best_ask) {
        return SlippageOutcome::Invalid(InvalidData::NonPositiveAskPrice(best_ask));
    }
    if !is_positive(order_quantity_quote) {
        return SlippageOutcome::Invalid(InvalidData::NonPositiveQuantity(order_quantity_quote));
    }

    let qty = order_quantity_quote / best_ask;
    let available = book.total_ask_volume();
    if qty > available {
        return SlippageOutcome::InsufficientLiquidity {
            required: qty,
            available,
        };
    }

    let mut remaining = qty;
    let mut total_cost = 0.0;
    let mut levels_consumed = 0;

    for level in &book.asks {
        if remaining <= 0.0 {
            break;
        }
        let filled = remaining.min(level.size);
        if filled <= 0.0 {
            continue;
        }
        total_cost += filled * level.price;
        remaining -= filled;
        levels_consumed += 1;
    }

    // Re-checked even after the volume test: float accumulation order differs
    // between the sum and the walk.
    if remaining > qty * FILL_EPSILON {
        return SlippageOutcome::InsufficientLiquidity {
            required: qty,
            available,
        };
    }

    let mid_price = match book.mid_price() {
        Some(price) => price,
        None => return SlippageOutcome::Invalid(InvalidData::EmptyBids),
    };
    if !is_positive(mid_price) {
        return SlippageOutcome::Invalid(InvalidData::NonPositiveMidPrice(mid_price));
    }

    let avg_fill_price = total_cost / qty;
    let slippage_pct = (avg_fill_price - mid_price) / mid_price * 100.0;

    SlippageOutcome::Filled(FillSummary {
        filled_qty: qty,
        avg_fill_price,
        mid_price,
        levels_consumed,
        slippage_pct,
    })
}
