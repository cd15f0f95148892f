//! Cost-model: execution cost estimation from an order book snapshot.
//!
//! This crate provides the pure, non-blocking cost components for a
//! hypothetical market buy order:
//! - Slippage via a level-by-level liquidity walk against the asks
//! - Taker fees from the fee tier schedule
//! - Market impact (simplified Almgren-Chriss: permanent + temporary)
//! - Maker/taker probability (sigmoid of spread over volatility)
//!
//! Numeric edge cases (empty side, non-positive price, zero volume,
//! non-positive volatility) never panic and never propagate as errors.
//! They come back as [`Estimate::Invalid`] or [`SlippageOutcome::Invalid`]
//! so the caller decides how to degrade and what to log.

mod error;
mod fees;
mod impact;
mod maker_taker;
mod model;
mod slippage;

pub use error::InvalidData;
pub use fees::taker_fees;
pub use impact::{ImpactCoefficients, market_impact_pct};
pub use maker_taker::{maker_probability_pct, sigmoid};
pub use model::{CostModel, CostReport, Estimate};
pub use slippage::{FillSummary, SlippageOutcome, walk_asks};
