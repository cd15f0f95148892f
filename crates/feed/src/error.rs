//! Feed error types.

use thiserror::Error;

/// A failed book fetch. Always transient from the loop's point of view.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport failure, including timeouts.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("unexpected http status {0}")]
    Status(u16),

    /// Body was not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Exchange returned an error code.
    #[error("exchange error {code}: {msg}")]
    Api { code: String, msg: String },

    /// Response carried no book.
    #[error("response contained no book")]
    EmptyPayload,
}

impl FeedError {
    /// True if the failure was a client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FeedError::Http(e) if e.is_timeout())
    }
}
