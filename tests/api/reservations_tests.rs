//! Reservation Validation API Tests

use axum::http::StatusCode;
use chrono::{Duration, Local};
use serde_json::{json, Value};

use crate::common::{TestApp, REGULAR, TABLE_FOUR};

const VALIDATE: &str = "/api/v1/reservations/validate";

fn tomorrow() -> String {
    (Local::now().date_naive() + Duration::days(1)).to_string()
}

fn reservation(start: &str, end: &str, party_size: i32) -> Value {
    json!({
        "customer_id": REGULAR,
        "reservation_date": tomorrow(),
        "start_time": start,
        "end_time": end,
        "party_size": party_size
    })
}

#[tokio::test]
async fn test_valid_reservation() {
    let app = TestApp::new();

    let response = app
        .server
        .post(VALIDATE)
        .json(&reservation("20:00:00", "22:00:00", 4))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_valid"], true);
    assert!(body["reason"].is_null());
}

#[tokio::test]
async fn test_before_opening_is_invalid() {
    let app = TestApp::new();

    let response = app
        .server
        .post(VALIDATE)
        .json(&reservation("08:00:00", "10:00:00", 2))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_valid"], false);
    assert!(body["reason"].as_str().unwrap().contains("business hours"));
}

#[tokio::test]
async fn test_oversized_party_is_invalid() {
    let app = TestApp::new();

    let body: Value = app
        .server
        .post(VALIDATE)
        .json(&reservation("18:00:00", "20:00:00", 21))
        .await
        .json();

    assert_eq!(body["is_valid"], false);
    assert_eq!(body["reason"], "Party size must be between 1 and 20");
}

#[tokio::test]
async fn test_past_date_is_invalid() {
    let app = TestApp::new();
    let yesterday = (Local::now().date_naive() - Duration::days(1)).to_string();

    let body: Value = app
        .server
        .post(VALIDATE)
        .json(&json!({
            "customer_id": REGULAR,
            "reservation_date": yesterday,
            "start_time": "18:00:00",
            "end_time": "20:00:00",
            "party_size": 2
        }))
        .await
        .json();

    assert_eq!(body["reason"], "Reservation date cannot be in the past");
}

#[tokio::test]
async fn test_party_larger_than_table() {
    let app = TestApp::new();
    let mut request = reservation("18:00:00", "20:00:00", 6);
    request["table_id"] = json!(TABLE_FOUR);

    let body: Value = app.server.post(VALIDATE).json(&request).await.json();

    assert_eq!(body["is_valid"], false);
    assert_eq!(body["reason"], "Table T4 seats 4 but the party has 6");
}

#[tokio::test]
async fn test_unknown_table_is_not_found() {
    let app = TestApp::new();
    let mut request = reservation("18:00:00", "20:00:00", 2);
    request["table_id"] = json!(555);

    app.server
        .post(VALIDATE)
        .json(&request)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
