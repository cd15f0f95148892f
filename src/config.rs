//! Central configuration for the cost simulator.
//!
//! Defaults live here; the command line (or its `SIM_*` environment
//! variables) overrides individual fields.

use std::time::Duration;

use feed::{OkxConfig, RefreshConfig};
use server::ServerConfig;
use simulation::latency::DEFAULT_LATENCY_WINDOW;
use types::ParameterSet;

/// Master configuration for the process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Server
    // ─────────────────────────────────────────────────────────────────────────
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,

    // ─────────────────────────────────────────────────────────────────────────
    // Feed
    // ─────────────────────────────────────────────────────────────────────────
    /// Delay between book fetches in milliseconds.
    pub refresh_interval_ms: u64,
    /// Per-request fetch timeout in milliseconds.
    pub fetch_timeout_ms: u64,
    /// Levels requested per side.
    pub book_depth: u32,
    /// Exchange REST base URL.
    pub base_url: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Simulation
    // ─────────────────────────────────────────────────────────────────────────
    /// Initial parameters.
    pub params: ParameterSet,
    /// Fetch latency samples kept for `/api/latency`.
    pub latency_window: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let server = ServerConfig::default();
        let okx = OkxConfig::default();
        Self {
            host: server.host,
            port: server.port,
            refresh_interval_ms: 1000,
            fetch_timeout_ms: okx.timeout.as_millis() as u64,
            book_depth: okx.depth,
            base_url: okx.base_url,
            params: ParameterSet::default(),
            latency_window: DEFAULT_LATENCY_WINDOW,
        }
    }
}

impl AppConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_refresh_interval_ms(mut self, ms: u64) -> Self {
        self.refresh_interval_ms = ms;
        self
    }

    pub fn with_fetch_timeout_ms(mut self, ms: u64) -> Self {
        self.fetch_timeout_ms = ms;
        self
    }

    pub fn with_book_depth(mut self, depth: u32) -> Self {
        self.book_depth = depth;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.params = self.params.with_instrument(instrument);
        self
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::default()
            .with_host(self.host.clone())
            .with_port(self.port)
    }

    pub fn okx_config(&self) -> OkxConfig {
        OkxConfig::default()
            .with_base_url(self.base_url.clone())
            .with_depth(self.book_depth)
            .with_timeout(Duration::from_millis(self.fetch_timeout_ms))
    }

    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig::default().with_interval(Duration::from_millis(self.refresh_interval_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server_config().bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.okx_config().base_url, "https://www.okx.com");
        assert_eq!(config.okx_config().depth, 20);
        assert_eq!(config.refresh_config().interval, Duration::from_secs(1));
        assert_eq!(config.params.instrument, "BTC-USDT-SWAP");
        assert_eq!(config.latency_window, 1000);
    }

    #[test]
    fn test_builders_flow_into_component_configs() {
        let config = AppConfig::default()
            .with_host("127.0.0.1")
            .with_port(9000)
            .with_refresh_interval_ms(250)
            .with_fetch_timeout_ms(800)
            .with_book_depth(50)
            .with_base_url("http://localhost:1234")
            .with_instrument("ETH-USDT-SWAP");

        assert_eq!(config.server_config().bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.refresh_config().interval, Duration::from_millis(250));
        let okx = config.okx_config();
        assert_eq!(okx.timeout, Duration::from_millis(800));
        assert_eq!(okx.depth, 50);
        assert_eq!(okx.base_url, "http://localhost:1234");
        assert_eq!(config.params.instrument, "ETH-USDT-SWAP");
    }
}
