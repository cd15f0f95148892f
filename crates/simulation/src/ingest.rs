//! Raw book entries to validated [`PriceLevel`]s.
//!
//! Exchanges send each level as an array of strings, e.g. OKX sends
//! `["65000.1", "0.52", "0", "3"]` (price, size, deprecated, order count).
//! Only the first two fields are used. Bad entries are dropped with a
//! warning; a partial book is still a usable book.

use tracing::warn;
use types::{BookSnapshot, PriceLevel, Timestamp};

/// One raw level as received from the exchange.
pub type RawLevel = Vec<String>;

/// Parse raw entries for one side of the book.
///
/// Drops (and logs) entries that have fewer than two fields, do not parse
/// as finite numbers, have a non-positive price, or a negative size.
pub fn parse_levels(side: &str, entries: &[RawLevel]) -> Vec<PriceLevel> {
    entries
        .iter()
        .filter_map(|entry| match parse_entry(entry) {
            Ok(level) => Some(level),
            Err(reason) => {
                warn!(side, ?entry, reason, "invalid book entry dropped");
                None
            }
        })
        .collect()
}

fn parse_entry(entry: &[String]) -> Result<PriceLevel, &'static str> {
    if entry.len() < 2 {
        return Err("fewer than two fields");
    }
    let price: f64 = entry[0].trim().parse().map_err(|_| "unparseable price")?;
    let size: f64 = entry[1].trim().parse().map_err(|_| "unparseable size")?;

    if !price.is_finite() || !size.is_finite() {
        return Err("non-finite value");
    }
    if price <= 0.0 {
        return Err("non-positive price");
    }
    if size < 0.0 {
        return Err("negative size");
    }
    Ok(PriceLevel::new(price, size))
}

/// Build a snapshot from raw bid and ask entries.
///
/// Level order is kept as received (bids descending, asks ascending).
pub fn build_snapshot(
    instrument: &str,
    raw_bids: &[RawLevel],
    raw_asks: &[RawLevel],
    captured_at: Timestamp,
) -> BookSnapshot {
    BookSnapshot::new(
        instrument,
        parse_levels("bid", raw_bids),
        parse_levels("ask", raw_asks),
        captured_at,
    )
}
