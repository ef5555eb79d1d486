use didscope_app::{build_router, AppState};
use didscope_batch::{BatchPlan, ReputationService};
use didscope_core::{AppConfig, DataSource, ReputationRecord};
use didscope_provider::{ProviderChain, SimulatedProvider};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn spawn_app() -> SocketAddr {
    let config = AppConfig::default();
    let chain = ProviderChain::with_providers(
        Vec::new(),
        Some(Arc::new(SimulatedProvider::seeded(2026))),
    );
    let plan = BatchPlan::route(&config.batching).with_window_delay(Duration::ZERO);
    let service = ReputationService::new(Arc::new(chain), plan);
    let app = build_router(AppState::with_service(config, service));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });
    addr
}

async fn post_json(addr: SocketAddr, path: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}{path}"))
        .json(&body)
        .send()
        .await
        .expect("send request")
}

async fn post_raw(addr: SocketAddr, path: &str, body: &'static str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}{path}"))
        .body(body)
        .send()
        .await
        .expect("send request")
}

#[tokio::test]
async fn healthz_and_version() {
    let addr = spawn_app().await;
    let health = reqwest::get(format!("http://{addr}/healthz"))
        .await
        .expect("healthz");
    assert_eq!(health.status(), 200);
    assert!(health.headers().contains_key("x-request-id"));
    assert_eq!(health.text().await.expect("body"), "ok");

    let version = reqwest::get(format!("http://{addr}/version"))
        .await
        .expect("version");
    assert_eq!(version.text().await.expect("body"), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn validate_returns_scored_record() {
    let addr = spawn_app().await;
    let resp = post_json(addr, "/api/validate", json!({"phoneNumber": "+15551234567"})).await;
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["phoneNumber"], "+15551234567");
    assert_eq!(body["source"], "simulated");
    assert!(body["healthScore"]["score"].as_u64().expect("score") <= 100);
    assert!(body["healthScore"]["grade"].is_string());
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn validate_rejects_missing_number() {
    let addr = spawn_app().await;
    for body in [json!({}), json!({"phoneNumber": ""}), json!({"phoneNumber": true})] {
        let resp = post_json(addr, "/api/validate", body).await;
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.expect("json body");
        assert_eq!(body, json!({"error": "Phone number is required"}));
    }
}

#[tokio::test]
async fn validate_accepts_bare_json_number() {
    let addr = spawn_app().await;
    for raw in [json!(5551234567_u64), json!(5551234567.0_f64)] {
        let resp = post_json(addr, "/api/validate", json!({ "phoneNumber": raw })).await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.expect("json body");
        assert_eq!(body["phoneNumber"], "5551234567");
    }
}

#[tokio::test]
async fn validate_rejects_malformed_json() {
    let addr = spawn_app().await;
    let resp = post_raw(addr, "/api/validate", "{\"phoneNumber\":").await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body, json!({"error": "Invalid JSON body"}));
}

#[tokio::test]
async fn bulk_caps_at_one_hundred_in_order() {
    let addr = spawn_app().await;
    let numbers: Vec<Value> = (0..130)
        .map(|i| {
            if i % 2 == 0 {
                json!(format!("+1555000{i:04}"))
            } else {
                json!(15_550_000_000_u64 + i)
            }
        })
        .collect();

    let resp = post_json(addr, "/api/validate/bulk", json!({ "phoneNumbers": numbers })).await;
    assert_eq!(resp.status(), 200);

    let records: Vec<ReputationRecord> = resp.json().await.expect("record array");
    assert_eq!(records.len(), 100);
    assert_eq!(records[0].phone_number, "+15550000000");
    assert_eq!(records[1].phone_number, "15550000001");
    assert_eq!(records[99].phone_number, "15550000099");
    assert!(records
        .iter()
        .all(|r| r.source == DataSource::Simulated && r.health_score.is_some()));
}

#[tokio::test]
async fn bulk_rejects_non_array() {
    let addr = spawn_app().await;
    for body in [
        json!({}),
        json!({"phoneNumbers": "+15551234567"}),
        json!({"phoneNumbers": [true]}),
    ] {
        let resp = post_json(addr, "/api/validate/bulk", body).await;
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.expect("json body");
        assert_eq!(body, json!({"error": "Phone numbers array is required"}));
    }
}

#[tokio::test]
async fn export_returns_csv_attachment() {
    let addr = spawn_app().await;
    let records: Value = post_json(
        addr,
        "/api/validate/bulk",
        json!({"phoneNumbers": ["+15551230001", "+15551230002"]}),
    )
    .await
    .json()
    .await
    .expect("records");

    let resp = post_json(addr, "/api/export", records).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"],
        "text/csv; charset=utf-8"
    );
    let disposition = resp.headers()["content-disposition"]
        .to_str()
        .expect("ascii header")
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"phone-reputation-"));
    assert!(disposition.ends_with(".csv\""));

    let csv = resp.text().await.expect("csv body");
    let lines: Vec<&str> = csv.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("\"+15551230001\""));
    assert!(lines[2].ends_with("\"simulated\""));
}

#[tokio::test]
async fn import_extracts_numbers() {
    let addr = spawn_app().await;
    let resp = post_raw(
        addr,
        "/api/import",
        "name,phone\n\"Acme, Inc\",(555) 123-4567\nBeta,555-0100\n",
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body, json!({"phoneNumbers": ["(555) 123-4567"]}));

    let resp = post_raw(addr, "/api/import", "name\nnobody\n").await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body, json!({"error": "No valid phone numbers found in CSV"}));
}

#[tokio::test]
async fn summary_counts_records() {
    let addr = spawn_app().await;
    let mut degraded = serde_json::to_value(ReputationRecord::degraded(
        "+15550000000",
        "Validation failed",
    ))
    .expect("serialize record");
    degraded["reputation"]["riskLevel"] = json!("high");

    let resp = post_json(addr, "/api/summary", json!([degraded])).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["total"], 1);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["highRisk"], 1);
    assert_eq!(body["notices"][1]["message"], "Found 1 high-risk numbers!");
}

#[tokio::test]
async fn summary_rejects_wrong_shape() {
    let addr = spawn_app().await;
    let resp = post_json(addr, "/api/summary", json!({"records": []})).await;
    assert_eq!(resp.status(), 400);
}
