//! Axum application builder.
//!
//! Configures routes, middleware, and state for the server.
//!
//! # Routes
//!
//! - `GET /` - HTML page with parameters and the latest result
//! - `GET /api/results` - Latest `SimulationResult`
//! - `GET /api/params` - Active `ParameterSet`
//! - `POST /api/params` - Apply a `ParameterUpdate`
//! - `GET /api/latency` - Fetch latency summary
//! - `GET /ws` - Result stream
//! - `GET /health` - Liveness probe

use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{api, health, web, ws};
use crate::state::ServerState;

/// Create the Axum application with all routes.
pub fn create_app(state: ServerState) -> Router {
    // CORS layer for browser clients served elsewhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        // Page
        .route("/", get(web::index))
        // Health
        .route("/health", get(health::health))
        // WebSocket
        .route("/ws", get(ws::ws_handler))
        // API
        .route("/api/results", get(api::get_results))
        .route("/api/params", get(api::get_params).post(api::post_params))
        .route("/api/latency", get(api::get_latency))
        .fallback(api::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host to bind to.
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".into(),
        }
    }
}

impl ServerConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use simulation::SimulationState;
    use tokio::sync::{Notify, broadcast};

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_server_config_builders() {
        let config = ServerConfig::default().with_host("127.0.0.1").with_port(9100);
        assert_eq!(config.bind_addr(), "127.0.0.1:9100");
    }

    #[test]
    fn test_create_app() {
        let (result_tx, _) = broadcast::channel(16);
        let state = ServerState::new(
            Arc::new(SimulationState::default()),
            result_tx,
            Arc::new(Notify::new()),
        );

        let _app = create_app(state);
    }
}
