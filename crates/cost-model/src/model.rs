//! Cost model facade.
//!
//! [`CostModel::compute`] evaluates every component against one book and one
//! parameter set. It is a pure function of its inputs: the same book and
//! parameters always produce the same [`CostReport`].

use types::{BookSnapshot, ParameterSet};

use crate::error::InvalidData;
use crate::fees::taker_fees;
use crate::impact::{ImpactCoefficients, market_impact_pct};
use crate::maker_taker::maker_probability_pct;
use crate::slippage::{SlippageOutcome, walk_asks};

/// A metric that is either computed or replaced by an invalid-data signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate<T> {
    Valid(T),
    Invalid(InvalidData),
}

impl<T> Estimate<T> {
    /// True if the metric was computed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Estimate::Valid(_))
    }

    /// The invalid-data signal, if any.
    pub fn invalid(&self) -> Option<InvalidData> {
        match self {
            Estimate::Valid(_) => None,
            Estimate::Invalid(reason) => Some(*reason),
        }
    }
}

impl Estimate<f64> {
    /// The value, or 0.0 when invalid.
    pub fn value_or_zero(&self) -> f64 {
        match self {
            Estimate::Valid(v) => *v,
            Estimate::Invalid(_) => 0.0,
        }
    }
}

/// Every cost component for one (book, parameters) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostReport {
    /// Liquidity walk outcome.
    pub slippage: SlippageOutcome,
    /// Taker fees in quote currency.
    pub fees_quote: f64,
    /// Market impact in percent.
    pub market_impact_pct: Estimate<f64>,
    /// Maker probability in percent.
    pub maker_probability_pct: Estimate<f64>,
}

impl CostReport {
    /// Every invalid-data signal raised while computing this report.
    pub fn diagnostics(&self) -> Vec<(&'static str, InvalidData)> {
        let mut out = Vec::new();
        if let SlippageOutcome::Invalid(reason) = self.slippage {
            out.push(("slippage", reason));
        }
        if let Some(reason) = self.market_impact_pct.invalid() {
            out.push(("market_impact", reason));
        }
        if let Some(reason) = self.maker_probability_pct.invalid() {
            out.push(("maker_taker", reason));
        }
        out
    }
}

/// Execution cost model for a hypothetical market buy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostModel {
    impact: ImpactCoefficients,
}

impl CostModel {
    /// Create a cost model with the given impact coefficients.
    pub fn new(impact: ImpactCoefficients) -> Self {
        Self { impact }
    }

    /// Compute all cost components.
    ///
    /// Fees, impact and maker probability are evaluated unconditionally;
    /// slippage last.
    pub fn compute(&self, book: &BookSnapshot, params: &ParameterSet) -> CostReport {
        let fees_quote = taker_fees(params.order_quantity_quote, params.fee_tier);
        let market_impact_pct = market_impact_pct(book, params.order_quantity_quote, self.impact);
        let maker_probability_pct = maker_probability_pct(book, params.volatility);
        let slippage = walk_asks(book, params.order_quantity_quote);

        CostReport {
            slippage,
            fees_quote,
            market_impact_pct,
            maker_probability_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{FeeTier, PriceLevel};

    fn sample_book() -> BookSnapshot {
        BookSnapshot::new(
            "TEST",
            vec![PriceLevel::new(99.0, 5.0)],
            vec![PriceLevel::new(100.0, 1.0), PriceLevel::new(101.0, 2.0)],
            0,
        )
    }

    #[test]
    fn test_compute_full_report() {
        let model = CostModel::default();
        let params = ParameterSet::default().with_quantity(100.0);

        let report = model.compute(&sample_book(), &params);

        assert!(matches!(report.slippage, SlippageOutcome::Filled(_)));
        assert!((report.fees_quote - 0.1).abs() < 1e-12);
        assert!(report.market_impact_pct.is_valid());
        assert!(report.maker_probability_pct.is_valid());
        assert!(report.diagnostics().is_empty());
    }

    #[test]
    fn test_compute_insufficient_liquidity_keeps_other_components() {
        let model = CostModel::default();
        let params = ParameterSet::default()
            .with_quantity(1_000_000.0)
            .with_fee_tier(FeeTier::Vip);

        let report = model.compute(&sample_book(), &params);

        assert!(report.slippage.is_insufficient_liquidity());
        assert!((report.fees_quote - 800.0).abs() < 1e-9);
        assert!(report.market_impact_pct.value_or_zero() > 0.0);
        assert!(report.maker_probability_pct.value_or_zero() > 0.0);
    }

    #[test]
    fn test_diagnostics_collects_invalid_components() {
        let model = CostModel::default();
        let book = BookSnapshot::new(
            "TEST",
            vec![PriceLevel::new(99.0, 5.0)],
            vec![PriceLevel::new(0.0, 1.0)],
            0,
        );
        let report = model.compute(&book, &ParameterSet::default());
        let components: Vec<_> = report.diagnostics().into_iter().map(|(c, _)| c).collect();
        assert_eq!(components, vec!["slippage", "market_impact"]);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let model = CostModel::default();
        let params = ParameterSet::default().with_quantity(250.0);
        let book = sample_book();
        assert_eq!(model.compute(&book, &params), model.compute(&book, &params));
    }
}
