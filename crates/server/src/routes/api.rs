//! REST API endpoints.
//!
//! - `GET /api/results` - Latest result; requests a refresh when there is no book
//! - `GET /api/params` - Active parameters
//! - `POST /api/params` - Apply a partial update, then request a refresh
//! - `GET /api/latency` - Fetch latency summary

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::Uri;
use serde::Serialize;
use tracing::debug;
use types::{LatencyStats, ParameterSet, ParameterUpdate, SimulationResult};

use crate::error::{AppError, AppResult};
use crate::state::ServerState;

/// Latest result: `GET /api/results`
pub async fn get_results(State(state): State<ServerState>) -> Json<SimulationResult> {
    if state.sim.book_is_empty() {
        debug!("results requested without a book, requesting refresh");
        state.request_refresh();
    }
    Json(state.sim.current_result())
}

/// Active parameters: `GET /api/params`
pub async fn get_params(State(state): State<ServerState>) -> Json<ParameterSet> {
    Json(state.sim.current_parameters())
}

/// Parameter update response.
#[derive(Debug, Serialize)]
pub struct ParamsResponse {
    pub status: &'static str,
    pub params: ParameterSet,
}

/// Apply a parameter update: `POST /api/params`
///
/// Unset fields keep their values. Malformed bodies and invalid values are
/// both 400 with the JSON error body; the active parameters stay unchanged.
pub async fn post_params(
    State(state): State<ServerState>,
    body: Result<Json<ParameterUpdate>, JsonRejection>,
) -> AppResult<Json<ParamsResponse>> {
    let Json(update) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let params = state.sim.update_parameters(update)?;
    state.request_refresh();

    Ok(Json(ParamsResponse {
        status: "success",
        params,
    }))
}

/// Fetch latency summary: `GET /api/latency`
pub async fn get_latency(State(state): State<ServerState>) -> Json<LatencyStats> {
    Json(state.sim.latency_stats())
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use simulation::{NO_DATA_WARNING, SimulationState};
    use tokio::sync::{Notify, broadcast};
    use types::{FeeTier, ResultState};

    fn state() -> ServerState {
        let (result_tx, _) = broadcast::channel(16);
        ServerState::new(
            Arc::new(SimulationState::default()),
            result_tx,
            Arc::new(Notify::new()),
        )
    }

    fn raw(price: &str, size: &str) -> Vec<String> {
        vec![price.to_string(), size.to_string()]
    }

    #[tokio::test]
    async fn test_results_without_book_request_refresh() {
        let state = state();
        let Json(result) = get_results(State(state.clone())).await;

        assert_eq!(result.state, ResultState::NoData);
        assert_eq!(result.warning.as_deref(), Some(NO_DATA_WARNING));
        assert_eq!(state.metrics.refresh_requests(), 1);
    }

    #[tokio::test]
    async fn test_results_with_book_do_not_request_refresh() {
        let state = state();
        state
            .sim
            .ingest_snapshot(&[raw("99", "5")], &[raw("100", "1"), raw("101", "2")], 3.0);

        let Json(result) = get_results(State(state.clone())).await;
        assert_eq!(result.state, ResultState::Ok);
        assert_eq!(state.metrics.refresh_requests(), 0);
    }

    #[tokio::test]
    async fn test_post_params_success() {
        let state = state();
        let update = ParameterUpdate {
            order_quantity_quote: Some(500.0),
            fee_tier: Some(FeeTier::Vip),
            ..Default::default()
        };

        let Json(response) = post_params(State(state.clone()), Ok(Json(update)))
            .await
            .unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(response.params.order_quantity_quote, 500.0);
        assert_eq!(response.params.fee_tier, FeeTier::Vip);
        assert_eq!(state.sim.current_parameters(), response.params);
        assert_eq!(state.metrics.refresh_requests(), 1);
    }

    #[tokio::test]
    async fn test_post_params_invalid_is_bad_request() {
        let state = state();
        let before = state.sim.current_parameters();
        let update = ParameterUpdate {
            volatility: Some(-0.5),
            ..Default::default()
        };

        let err = post_params(State(state.clone()), Ok(Json(update)))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.sim.current_parameters(), before);
        assert_eq!(state.metrics.refresh_requests(), 0);
    }

    #[tokio::test]
    async fn test_get_params_and_latency() {
        let state = state();
        let Json(params) = get_params(State(state.clone())).await;
        assert_eq!(params, ParameterSet::default());

        state.sim.ingest_snapshot(&[raw("99", "5")], &[raw("100", "1")], 8.0);
        let Json(stats) = get_latency(State(state)).await;
        assert_eq!(stats.count, 1);
        assert_eq!(stats.last_ms, Some(8.0));
    }

    #[test]
    fn test_params_response_serialization() {
        let response = ParamsResponse {
            status: "success",
            params: ParameterSet::default(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"instrument\":\"BTC-USDT-SWAP\""));
    }
}
