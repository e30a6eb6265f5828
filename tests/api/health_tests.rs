//! Health Check API Tests

use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.server.get("/health/live").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "alive");
}

#[tokio::test]
async fn test_readiness_without_database() {
    let app = TestApp::new();

    let response = app.server.get("/health/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["message"], "in-memory store");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_request_counts() {
    let app = TestApp::new();

    app.server.get("/health").await.assert_status_ok();
    let response = app.server.get("/metrics").await;

    response.assert_status_ok();
    assert!(response.text().contains("game_cafe_http_requests_total"));
}
