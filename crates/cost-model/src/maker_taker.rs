//! Maker/taker probability.
//!
//! A fixed closed-form model, not a fitted classifier: the wider the spread
//! relative to volatility, the more likely a passive (maker) fill.

use types::BookSnapshot;

use crate::error::{InvalidData, is_positive};
use crate::model::Estimate;

/// Logistic function, evaluated without overflow for large `|x|`.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Probability of maker execution in percent, `sigmoid(spread / volatility) * 100`.
pub fn maker_probability_pct(book: &BookSnapshot, volatility: f64) -> Estimate<f64> {
    if book.best_bid().is_none() {
        return Estimate::Invalid(InvalidData::EmptyBids);
    }
    let spread = match book.spread() {
        Some(spread) => spread,
        None => return Estimate::Invalid(InvalidData::EmptyAsks),
    };
    if !is_positive(volatility) || !volatility.is_finite() {
        return Estimate::Invalid(InvalidData::NonPositiveVolatility(volatility));
    }

    let probability = sigmoid(spread / volatility) * 100.0;

    if probability.is_nan() {
        return Estimate::Invalid(InvalidData::NonPositiveVolatility(volatility));
    }
    Estimate::Valid(probability.clamp(0.0, 100.0))
}
