//! Exchange fees.

use types::FeeTier;

/// Taker fees in quote currency for an order of `order_quantity_quote` notional.
///
/// Flat lookup, independent of the book. Linear in notional.
pub fn taker_fees(order_quantity_quote: f64, fee_tier: FeeTier) -> f64 {
    let fee_rate = fee_tier.taker_rate_pct() / 100.0;
    order_quantity_quote * fee_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_tier() {
        assert!((taker_fees(100.0, FeeTier::Regular) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_vip_tier() {
        assert!((taker_fees(1_000.0, FeeTier::Vip) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_fees_are_linear() {
        for tier in [FeeTier::Regular, FeeTier::Vip] {
            for q in [1.0, 100.0, 12_345.0] {
                assert_eq!(taker_fees(2.0 * q, tier), 2.0 * taker_fees(q, tier));
            }
        }
    }
}
