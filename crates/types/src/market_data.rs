//! Order book types.
//!
//! A [`BookSnapshot`] is an immutable view of one instrument's book at one
//! point in time. A new fetch produces a new snapshot that replaces the old
//! one wholesale; snapshots are never patched level by level.

use crate::{Instrument, Timestamp};
use serde::{Deserialize, Serialize};

// =============================================================================
// Price Level
// =============================================================================

/// A single price level in the order book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price at this level (quote currency per unit of base asset).
    pub price: f64,
    /// Resting size at this level (base asset units).
    pub size: f64,
}

impl PriceLevel {
    /// Create a new price level.
    pub fn new(price: f64, size: f64) -> Self {
        Self { price, size }
    }
}

impl From<(f64, f64)> for PriceLevel {
    fn from((price, size): (f64, f64)) -> Self {
        Self { price, size }
    }
}

// =============================================================================
// Book Snapshot
// =============================================================================

/// Snapshot of the order book at a point in time.
///
/// Either side may be empty, which means "no data" rather than an error.
/// `best_bid < best_ask` is expected but not enforced; upstream data is
/// trusted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BookSnapshot {
    /// Instrument this book is for.
    pub instrument: Instrument,
    /// Bid levels (highest first).
    pub bids: Vec<PriceLevel>,
    /// Ask levels (lowest first).
    pub asks: Vec<PriceLevel>,
    /// When the snapshot was captured.
    pub captured_at: Timestamp,
}

impl BookSnapshot {
    /// Create a snapshot from already-validated levels.
    pub fn new(
        instrument: impl Into<Instrument>,
        bids: Vec<PriceLevel>,
        asks: Vec<PriceLevel>,
        captured_at: Timestamp,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            bids,
            asks,
            captured_at,
        }
    }

    /// An empty snapshot, used after a failed fetch.
    pub fn empty(instrument: impl Into<Instrument>, captured_at: Timestamp) -> Self {
        Self::new(instrument, Vec::new(), Vec::new(), captured_at)
    }

    /// True if either side of the book has no levels.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() || self.asks.is_empty()
    }

    /// Get the best bid price.
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|l| l.price)
    }

    /// Get the best ask price.
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|l| l.price)
    }

    /// Calculate the spread between best bid and ask.
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Calculate the mid price.
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Sum of resting size across all ask levels.
    pub fn total_ask_volume(&self) -> f64 {
        self.asks.iter().map(|l| l.size).sum()
    }

    /// Sum of resting size across all bid levels.
    pub fn total_bid_volume(&self) -> f64 {
        self.bids.iter().map(|l| l.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> BookSnapshot {
        BookSnapshot::new(
            "BTC-USDT-SWAP",
            vec![PriceLevel::new(99.0, 5.0), PriceLevel::new(98.0, 1.0)],
            vec![PriceLevel::new(100.0, 1.0), PriceLevel::new(101.0, 2.0)],
            0,
        )
    }

    #[test]
    fn test_best_prices_and_mid() {
        let book = sample_book();
        assert_eq!(book.best_bid(), Some(99.0));
        assert_eq!(book.best_ask(), Some(100.0));
        assert_eq!(book.mid_price(), Some(99.5));
        assert_eq!(book.spread(), Some(1.0));
    }

    #[test]
    fn test_volumes() {
        let book = sample_book();
        assert_eq!(book.total_ask_volume(), 3.0);
        assert_eq!(book.total_bid_volume(), 6.0);
    }

    #[test]
    fn test_one_sided_book_is_empty() {
        let mut book = sample_book();
        assert!(!book.is_empty());

        book.bids.clear();
        assert!(book.is_empty());
        assert_eq!(book.mid_price(), None);
        assert_eq!(book.spread(), None);
    }

    #[test]
    fn test_empty_snapshot() {
        let book = BookSnapshot::empty("ETH-USDT-SWAP", 42);
        assert!(book.is_empty());
        assert_eq!(book.instrument, "ETH-USDT-SWAP");
        assert_eq!(book.captured_at, 42);
        assert_eq!(book.total_ask_volume(), 0.0);
    }
}
