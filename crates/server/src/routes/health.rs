//! Health check endpoint.
//!
//! - `GET /health` - Liveness probe (always 200 if server is up)

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use types::ResultState;

use crate::state::ServerState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: &'static str,
    /// State of the latest result.
    pub result_state: ResultState,
    /// Active instrument.
    pub instrument: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Active WebSocket connections.
    pub ws_connections: u64,
    /// Successful fetches in the latency window.
    pub fetches: usize,
}

/// Liveness probe: `GET /health`
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let snapshot = state.sim.snapshot();

    Json(HealthResponse {
        status: "healthy",
        result_state: snapshot.result.state,
        instrument: snapshot.params.instrument,
        uptime_secs: state.uptime_secs(),
        ws_connections: state.metrics.ws_count(),
        fetches: state.sim.latency_stats().count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            result_state: ResultState::InsufficientLiquidity,
            instrument: "BTC-USDT-SWAP".into(),
            uptime_secs: 60,
            ws_connections: 2,
            fetches: 10,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"result_state\":\"insufficient_liquidity\""));
        assert!(json.contains("\"fetches\":10"));
    }
}
