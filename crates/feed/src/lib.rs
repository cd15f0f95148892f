//! Feed: fetches order books and keeps `SimulationState` current.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  fetch()   ┌──────────────┐  ingest_book() / ingest_failure()
//! │ BookSource   │◀──────────│ RefreshLoop  │─────────────────────────────────▶ SimulationState
//! │ (OKX REST)   │──────────▶│ (tokio task) │
//! └──────────────┘  RawBook   └──────────────┘
//!                                  ▲    ▲
//!                     Notify ──────┘    └────── watch (shutdown)
//! ```
//!
//! Fetching happens outside the state lock. Every fetch error is caught at
//! the loop boundary and degrades the result to `NoData`; the loop keeps
//! running.

pub mod error;
pub mod okx;
pub mod refresh;
pub mod source;

pub use error::FeedError;
pub use okx::{OkxBookSource, OkxConfig, parse_books_response};
pub use refresh::{RefreshConfig, RefreshLoop};
pub use source::{BookSource, RawBook};
