//! Server-rendered page: `GET /`

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use simulation::StateSnapshot;
use types::{FeeTier, ResultState};

use crate::state::ServerState;

/// Helper to render templates into axum responses
fn render_template<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template render error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e),
            )
                .into_response()
        }
    }
}

/// One row of the results table.
pub struct MetricRow {
    /// Field name in the `SimulationResult` JSON.
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Fee tier choice in the parameter form.
pub struct FeeTierOption {
    pub name: &'static str,
    /// `"selected"` for the active tier, empty otherwise.
    pub selected: &'static str,
}

/// Main page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub exchange: String,
    pub instrument: String,
    pub order_type: String,
    pub quantity: String,
    pub volatility: String,
    pub fee_tiers: Vec<FeeTierOption>,
    pub state: &'static str,
    /// Empty when the result carries no warning.
    pub warning: String,
    pub best_bid: String,
    pub best_ask: String,
    pub metrics: Vec<MetricRow>,
}

impl IndexPage {
    /// Build the page model from a consistent state snapshot.
    pub fn from_snapshot(snapshot: &StateSnapshot) -> Self {
        let params = &snapshot.params;
        let result = &snapshot.result;
        let price = |p: Option<f64>| p.map_or_else(|| "-".to_string(), |p| format!("{p:.2}"));

        Self {
            exchange: params.exchange.clone(),
            instrument: params.instrument.clone(),
            order_type: params.order_type.to_string(),
            quantity: format!("{}", params.order_quantity_quote),
            volatility: format!("{}", params.volatility),
            fee_tiers: [FeeTier::Regular, FeeTier::Vip]
                .into_iter()
                .map(|tier| FeeTierOption {
                    name: tier.as_str(),
                    selected: if tier == params.fee_tier { "selected" } else { "" },
                })
                .collect(),
            state: state_label(result.state),
            warning: result.warning.clone().unwrap_or_default(),
            best_bid: price(snapshot.book.best_bid()),
            best_ask: price(snapshot.book.best_ask()),
            metrics: vec![
                MetricRow {
                    key: "slippage_pct",
                    label: "Slippage (%)",
                    value: format!("{:.4}", result.slippage_pct),
                },
                MetricRow {
                    key: "slippage_quote",
                    label: "Slippage (quote)",
                    value: format!("{:.4}", result.slippage_quote),
                },
                MetricRow {
                    key: "fees_quote",
                    label: "Fees (quote)",
                    value: format!("{:.4}", result.fees_quote),
                },
                MetricRow {
                    key: "market_impact_pct",
                    label: "Market impact (%)",
                    value: format!("{:.6}", result.market_impact_pct),
                },
                MetricRow {
                    key: "market_impact_quote",
                    label: "Market impact (quote)",
                    value: format!("{:.6}", result.market_impact_quote),
                },
                MetricRow {
                    key: "net_cost_quote",
                    label: "Net cost (quote)",
                    value: format!("{:.4}", result.net_cost_quote),
                },
                MetricRow {
                    key: "maker_probability_pct",
                    label: "Maker probability (%)",
                    value: format!("{:.2}", result.maker_probability_pct),
                },
                MetricRow {
                    key: "fetch_latency_ms",
                    label: "Fetch latency (ms)",
                    value: format!("{:.1}", result.fetch_latency_ms),
                },
            ],
        }
    }
}

fn state_label(state: ResultState) -> &'static str {
    match state {
        ResultState::NoData => "no data",
        ResultState::InsufficientLiquidity => "insufficient liquidity",
        ResultState::Ok => "ok",
    }
}

/// Main page: `GET /`
///
/// Requests an early refresh when there is no book yet.
pub async fn index(State(state): State<ServerState>) -> Response {
    let snapshot = state.sim.snapshot();
    if snapshot.book.is_empty() {
        state.request_refresh();
    }
    render_template(&IndexPage::from_snapshot(&snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::SimulationState;

    #[test]
    fn test_page_renders_without_data() {
        let sim = SimulationState::default();
        let page = IndexPage::from_snapshot(&sim.snapshot());
        let html = page.render().unwrap();

        assert!(html.contains("BTC-USDT-SWAP"));
        assert!(html.contains("no orderbook data"));
        assert!(html.contains("no data"));
    }

    #[test]
    fn test_page_renders_result() {
        let sim = SimulationState::default();
        sim.ingest_snapshot(
            &[vec!["99".to_string(), "5".to_string()]],
            &[
                vec!["100".to_string(), "1".to_string()],
                vec!["101".to_string(), "2".to_string()],
            ],
            4.0,
        );
        let page = IndexPage::from_snapshot(&sim.snapshot());
        assert_eq!(page.best_ask, "100.00");
        assert_eq!(page.metrics[0].value, "0.5025");
        assert!(page.warning.is_empty());
        assert_eq!(page.fee_tiers[0].selected, "selected");

        let html = page.render().unwrap();
        assert!(html.contains("0.5025"));
        assert!(html.contains("Net cost (quote)"));
    }
}
