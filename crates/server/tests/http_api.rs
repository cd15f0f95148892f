//! End-to-end HTTP tests against a server bound to an ephemeral port.

use std::sync::Arc;

use serde_json::Value;
use server::{BroadcastHook, RESULT_CHANNEL_CAPACITY, ServerState, create_app};
use simulation::SimulationState;
use tokio::net::TcpListener;
use tokio::sync::{Notify, broadcast};

struct TestServer {
    base: String,
    sim: Arc<SimulationState>,
}

async fn spawn_server() -> TestServer {
    let (result_tx, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);
    let sim = Arc::new(
        SimulationState::default().with_hook(Arc::new(BroadcastHook::new(result_tx.clone()))),
    );
    let state = ServerState::new(sim.clone(), result_tx, Arc::new(Notify::new()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_app(state)).await.unwrap();
    });

    TestServer {
        base: format!("http://{addr}"),
        sim,
    }
}

fn raw(price: &str, size: &str) -> Vec<String> {
    vec![price.to_string(), size.to_string()]
}

#[tokio::test]
async fn test_results_round_trip() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/api/results", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["state"], "no_data");
    assert_eq!(body["warning"], "no orderbook data");

    server
        .sim
        .ingest_snapshot(&[raw("99", "5")], &[raw("100", "1"), raw("101", "2")], 7.0);

    let body: Value = client
        .get(format!("{}/api/results", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["state"], "ok");
    assert!(body["warning"].is_null());
    assert!((body["slippage_pct"].as_f64().unwrap() - 0.5025).abs() < 1e-4);
    assert_eq!(body["fetch_latency_ms"], 7.0);
}

#[tokio::test]
async fn test_post_params_accepts_legacy_field_names() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/params", server.base))
        .json(&serde_json::json!({
            "asset": "ETH-USDT-SWAP",
            "quantity": 250.0,
            "fee_tier": "vip"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["params"]["instrument"], "ETH-USDT-SWAP");
    assert_eq!(body["params"]["order_quantity_quote"], 250.0);
    assert_eq!(body["params"]["fee_tier"], "vip");
    assert_eq!(body["params"]["volatility"], 0.02);

    let params: Value = client
        .get(format!("{}/api/params", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(params, body["params"]);
}

#[tokio::test]
async fn test_post_params_rejections_are_json_400() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/params", server.base))
        .json(&serde_json::json!({ "volatility": 0.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("volatility"));

    let response = client
        .post(format!("{}/api/params", server.base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 400);

    assert_eq!(server.sim.current_parameters().volatility, 0.02);
}

#[tokio::test]
async fn test_page_health_latency_and_fallback() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let page = client
        .get(format!("{}/", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(page.status(), 200);
    let html = page.text().await.unwrap();
    assert!(html.contains("Trade Cost Simulator"));

    let health: Value = client
        .get(format!("{}/health", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["instrument"], "BTC-USDT-SWAP");

    server
        .sim
        .ingest_snapshot(&[raw("99", "5")], &[raw("100", "1")], 11.0);
    let latency: Value = client
        .get(format!("{}/api/latency", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(latency["count"], 1);
    assert_eq!(latency["last_ms"], 11.0);

    let missing = client
        .get(format!("{}/api/unknown", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "/api/unknown");
}
