//! Book source abstraction.

use std::sync::Arc;

use async_trait::async_trait;
use simulation::RawLevel;
use types::Timestamp;

use crate::error::FeedError;

/// Unparsed book as returned by an exchange.
///
/// Entries are kept as strings; validation happens on ingest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBook {
    pub bids: Vec<RawLevel>,
    pub asks: Vec<RawLevel>,
    /// Exchange timestamp, when provided.
    pub exchange_ts: Option<Timestamp>,
}

/// Anything that can fetch a book for an instrument.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Fetch one book snapshot.
    async fn fetch(&self, instrument: &str) -> Result<RawBook, FeedError>;
}

#[async_trait]
impl<T: BookSource + ?Sized> BookSource for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, instrument: &str) -> Result<RawBook, FeedError> {
        (**self).fetch(instrument).await
    }
}
