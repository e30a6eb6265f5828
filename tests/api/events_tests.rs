//! Event Registration API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{TestApp, GOLD, REGULAR, SILVER, SINGLE_SEAT_EVENT, SMALL_EVENT};

fn registrations_uri(event_id: i64) -> String {
    format!("/api/v1/events/{}/registrations", event_id)
}

#[tokio::test]
async fn test_register_returns_created() {
    let app = TestApp::new();

    let response = app
        .server
        .post(&registrations_uri(SMALL_EVENT))
        .json(&json!({ "customer_id": REGULAR }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["event_id"], SMALL_EVENT);
    assert_eq!(body["customer_id"], REGULAR);
    assert_eq!(body["status"], "registered");
    assert_eq!(body["payment_status"], "paid");
}

#[tokio::test]
async fn test_ticketed_event_registration_is_pending_payment() {
    let app = TestApp::new();

    let response = app
        .server
        .post(&registrations_uri(SINGLE_SEAT_EVENT))
        .json(&json!({ "customer_id": REGULAR }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["payment_status"], "pending");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new();
    let uri = registrations_uri(SMALL_EVENT);

    app.server
        .post(&uri)
        .json(&json!({ "customer_id": REGULAR }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .post(&uri)
        .json(&json!({ "customer_id": REGULAR }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["message"], "already registered");
}

#[tokio::test]
async fn test_full_event_conflicts() {
    let app = TestApp::new();
    let uri = registrations_uri(SINGLE_SEAT_EVENT);

    app.server
        .post(&uri)
        .json(&json!({ "customer_id": REGULAR }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .post(&uri)
        .json(&json!({ "customer_id": SILVER }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["message"], "event full");
}

#[tokio::test]
async fn test_concurrent_requests_for_last_seat() {
    let app = TestApp::new();
    let uri = registrations_uri(SINGLE_SEAT_EVENT);

    let first = app.server.post(&uri).json(&json!({ "customer_id": REGULAR }));
    let second = app.server.post(&uri).json(&json!({ "customer_id": SILVER }));
    let (a, b) = tokio::join!(async { first.await }, async { second.await });

    let mut statuses = vec![a.status_code(), b.status_code()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let loser = if a.status_code() == StatusCode::CONFLICT { a } else { b };
    assert_eq!(loser.json::<Value>()["message"], "event full");
    assert_eq!(app.store.registrations(SINGLE_SEAT_EVENT).len(), 1);
}

#[tokio::test]
async fn test_register_unknown_event_is_not_found() {
    let app = TestApp::new();

    app.server
        .post(&registrations_uri(404))
        .json(&json!({ "customer_id": REGULAR }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_unknown_customer_is_not_found() {
    let app = TestApp::new();

    app.server
        .post(&registrations_uri(SMALL_EVENT))
        .json(&json!({ "customer_id": 999 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_rejects_invalid_customer_id() {
    let app = TestApp::new();

    let response = app
        .server
        .post(&registrations_uri(SMALL_EVENT))
        .json(&json!({ "customer_id": 0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 10007);
}

#[tokio::test]
async fn test_cancel_and_register_again() {
    let app = TestApp::new();
    let uri = registrations_uri(SINGLE_SEAT_EVENT);

    app.server
        .post(&uri)
        .json(&json!({ "customer_id": REGULAR }))
        .await
        .assert_status(StatusCode::CREATED);

    app.server
        .delete(&format!("{}/{}", uri, REGULAR))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .post(&uri)
        .json(&json!({ "customer_id": REGULAR }))
        .await
        .assert_status(StatusCode::CREATED);

    let participants: Value = app
        .server
        .get(&format!("/api/v1/events/{}/participants", SINGLE_SEAT_EVENT))
        .await
        .json();
    let list = participants["participants"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["status"], "cancelled");
    assert_eq!(list[1]["status"], "registered");
}

#[tokio::test]
async fn test_cancel_without_registration_is_not_found() {
    let app = TestApp::new();

    app.server
        .delete(&format!("{}/{}", registrations_uri(SMALL_EVENT), GOLD))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_participants_in_registration_order() {
    let app = TestApp::new();
    let uri = registrations_uri(SMALL_EVENT);

    for customer_id in [GOLD, REGULAR] {
        app.server
            .post(&uri)
            .json(&json!({ "customer_id": customer_id }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = app
        .server
        .get(&format!("/api/v1/events/{}/participants", SMALL_EVENT))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let customers: Vec<i64> = body["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["customer_id"].as_i64().unwrap())
        .collect();
    assert_eq!(customers, vec![GOLD, REGULAR]);
}

#[tokio::test]
async fn test_participants_unknown_event_is_not_found() {
    let app = TestApp::new();

    app.server
        .get("/api/v1/events/77/participants")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_reflects_registrations() {
    let app = TestApp::new();

    app.server
        .post(&registrations_uri(SMALL_EVENT))
        .json(&json!({ "customer_id": SILVER }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .get(&format!("/api/v1/events/{}/availability", SMALL_EVENT))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["max_participants"], 2);
    assert_eq!(body["current_participants"], 1);
    assert_eq!(body["available_spots"], 1);
    assert_eq!(body["is_full"], false);
}
