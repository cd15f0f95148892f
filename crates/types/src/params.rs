//! User-tunable simulation parameters.
//!
//! [`ParameterSet`] persists across fetches and only changes through an
//! explicit [`ParameterUpdate`]. Validation of the merged result lives in the
//! `simulation` crate so that a rejected update never touches the active set.

use crate::Instrument;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Fee Tier
// =============================================================================

/// Exchange fee tier.
///
/// Rates are percentages of notional (0.10 = 0.10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeeTier {
    #[default]
    #[serde(alias = "Regular", alias = "REGULAR")]
    Regular,
    #[serde(alias = "Vip", alias = "VIP")]
    Vip,
}

impl FeeTier {
    /// Taker fee rate in percent.
    pub fn taker_rate_pct(self) -> f64 {
        match self {
            FeeTier::Regular => 0.10,
            FeeTier::Vip => 0.08,
        }
    }

    /// Maker fee rate in percent.
    ///
    /// Not used by the net cost (the simulated order always takes), but part
    /// of the published fee schedule.
    pub fn maker_rate_pct(self) -> f64 {
        match self {
            FeeTier::Regular => 0.08,
            FeeTier::Vip => 0.06,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            FeeTier::Regular => "regular",
            FeeTier::Vip => "vip",
        }
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Type
// =============================================================================

/// Type of the hypothetical order. Only market orders are simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => f.write_str("market"),
        }
    }
}

// =============================================================================
// Parameter Set
// =============================================================================

/// Active parameters for the cost simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Exchange the book is fetched from (display only).
    pub exchange: String,
    /// Instrument to simulate against.
    pub instrument: Instrument,
    /// Order type (display only; always market).
    pub order_type: OrderType,
    /// Size of the hypothetical order in quote-currency notional.
    pub order_quantity_quote: f64,
    /// Volatility used by the maker/taker model.
    pub volatility: f64,
    /// Fee tier used for the fee estimate.
    pub fee_tier: FeeTier,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            exchange: "OKX".to_string(),
            instrument: "BTC-USDT-SWAP".to_string(),
            order_type: OrderType::Market,
            order_quantity_quote: 100.0,
            volatility: 0.02,
            fee_tier: FeeTier::Regular,
        }
    }
}

impl ParameterSet {
    /// Set the instrument.
    pub fn with_instrument(mut self, instrument: impl Into<Instrument>) -> Self {
        self.instrument = instrument.into();
        self
    }

    /// Set the order notional in quote currency.
    pub fn with_quantity(mut self, order_quantity_quote: f64) -> Self {
        self.order_quantity_quote = order_quantity_quote;
        self
    }

    /// Set the volatility.
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Set the fee tier.
    pub fn with_fee_tier(mut self, fee_tier: FeeTier) -> Self {
        self.fee_tier = fee_tier;
        self
    }
}

// =============================================================================
// Parameter Update
// =============================================================================

/// Partial parameter update. Unset fields keep their previous values.
///
/// `exchange` and `order_type` are not updatable: only one venue and one
/// order type are supported. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterUpdate {
    #[serde(default, alias = "asset")]
    pub instrument: Option<Instrument>,
    #[serde(default, alias = "quantity")]
    pub order_quantity_quote: Option<f64>,
    #[serde(default)]
    pub volatility: Option<f64>,
    #[serde(default)]
    pub fee_tier: Option<FeeTier>,
}

impl ParameterUpdate {
    /// True if the update sets no field.
    pub fn is_empty(&self) -> bool {
        self.instrument.is_none()
            && self.order_quantity_quote.is_none()
            && self.volatility.is_none()
            && self.fee_tier.is_none()
    }

    /// Merge this update over `base`, returning the candidate set.
    ///
    /// The result is not validated.
    pub fn apply_to(&self, base: &ParameterSet) -> ParameterSet {
        ParameterSet {
            exchange: base.exchange.clone(),
            instrument: self
                .instrument
                .as_deref()
                .map_or_else(|| base.instrument.clone(), |id| id.trim().to_string()),
            order_type: base.order_type,
            order_quantity_quote: self
                .order_quantity_quote
                .unwrap_or(base.order_quantity_quote),
            volatility: self.volatility.unwrap_or(base.volatility),
            fee_tier: self.fee_tier.unwrap_or(base.fee_tier),
        }
    }
}

impl From<&ParameterSet> for ParameterUpdate {
    fn from(params: &ParameterSet) -> Self {
        Self {
            instrument: Some(params.instrument.clone()),
            order_quantity_quote: Some(params.order_quantity_quote),
            volatility: Some(params.volatility),
            fee_tier: Some(params.fee_tier),
        }
    }
}
