//! OKX public order book source.
//!
//! Uses `GET /api/v5/market/books?instId=<instrument>&sz=<depth>` (public, no
//! API key). Response shape:
//!
//! ```text
//! {"code":"0","msg":"","data":[{"asks":[["65000.1","0.52","0","3"],...],
//!                               "bids":[...],"ts":"1718000000000"}]}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::FeedError;
use crate::source::{BookSource, RawBook};

/// Connection settings for [`OkxBookSource`].
#[derive(Debug, Clone)]
pub struct OkxConfig {
    /// Scheme and host, without trailing slash.
    pub base_url: String,
    /// Levels requested per side.
    pub depth: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for OkxConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.okx.com".to_string(),
            depth: 20,
            timeout: Duration::from_secs(5),
        }
    }
}

impl OkxConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches books from the OKX REST API.
pub struct OkxBookSource {
    client: reqwest::Client,
    config: OkxConfig,
}

impl OkxBookSource {
    /// Build the source and its HTTP client.
    pub fn new(config: OkxConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OkxConfig {
        &self.config
    }

    fn books_url(&self) -> String {
        format!("{}/api/v5/market/books", self.config.base_url)
    }
}

#[async_trait]
impl BookSource for OkxBookSource {
    fn name(&self) -> &str {
        "okx"
    }

    async fn fetch(&self, instrument: &str) -> Result<RawBook, FeedError> {
        let depth = self.config.depth.to_string();
        let response = self
            .client
            .get(self.books_url())
            .query(&[("instId", instrument), ("sz", depth.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(instrument, bytes = body.len(), "okx book received");
        parse_books_response(&body)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct BooksResponse {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<BookData>,
}

#[derive(Debug, Deserialize)]
struct BookData {
    #[serde(default)]
    asks: Vec<Vec<String>>,
    #[serde(default)]
    bids: Vec<Vec<String>>,
    #[serde(default)]
    ts: Option<String>,
}

/// Parse an OKX `market/books` response body.
///
/// A non-zero `code` is an [`FeedError::Api`]; a missing book is
/// [`FeedError::EmptyPayload`]. Individual entries are not validated here.
pub fn parse_books_response(body: &str) -> Result<RawBook, FeedError> {
    let response: BooksResponse = serde_json::from_str(body)?;
    if response.code != "0" {
        return Err(FeedError::Api {
            code: response.code,
            msg: response.msg,
        });
    }

    let book = response
        .data
        .into_iter()
        .next()
        .ok_or(FeedError::EmptyPayload)?;

    Ok(RawBook {
        bids: book.bids,
        asks: book.asks,
        exchange_ts: book.ts.and_then(|ts| ts.parse().ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "code": "0",
        "msg": "",
        "data": [{
            "asks": [["65000.1", "0.52", "0", "3"], ["65000.5", "1.1", "0", "5"]],
            "bids": [["64999.9", "2.0", "0", "8"]],
            "ts": "1718000000000"
        }]
    }"#;

    #[test]
    fn test_parse_sample_response() {
        let book = parse_books_response(SAMPLE).unwrap();
        assert_eq!(book.asks.len(), 2);
        assert_eq!(book.bids.len(), 1);
        assert_eq!(book.asks[0][0], "65000.1");
        assert_eq!(book.bids[0][1], "2.0");
        assert_eq!(book.exchange_ts, Some(1_718_000_000_000));
    }

    #[test]
    fn test_api_error_code() {
        let body = r#"{"code":"51001","msg":"Instrument ID does not exist","data":[]}"#;
        match parse_books_response(body) {
            Err(FeedError::Api { code, msg }) => {
                assert_eq!(code, "51001");
                assert_eq!(msg, "Instrument ID does not exist");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_data_is_empty_payload() {
        let body = r#"{"code":"0","msg":"","data":[]}"#;
        assert!(matches!(
            parse_books_response(body),
            Err(FeedError::EmptyPayload)
        ));
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        assert!(matches!(
            parse_books_response("<html>rate limited</html>"),
            Err(FeedError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_sides_parse_as_empty() {
        let body = r#"{"code":"0","data":[{"ts":"oops"}]}"#;
        let book = parse_books_response(body).unwrap();
        assert!(book.asks.is_empty());
        assert!(book.bids.is_empty());
        assert_eq!(book.exchange_ts, None);
    }

    #[test]
    fn test_config_builders() {
        let config = OkxConfig::default()
            .with_base_url("http://localhost:8080/")
            .with_depth(50)
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.depth, 50);
        assert_eq!(config.timeout, Duration::from_millis(250));

        let source = OkxBookSource::new(config).unwrap();
        assert_eq!(source.books_url(), "http://localhost:8080/api/v5/market/books");
        assert_eq!(source.name(), "okx");
    }
}
