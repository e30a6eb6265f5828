//! Order Settlement API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{TestApp, GOLD, REGULAR, SILVER};

const SETTLEMENT: &str = "/api/v1/orders/settlement";

#[tokio::test]
async fn test_silver_member_redeeming_points() {
    let app = TestApp::new();

    let response = app
        .server
        .post(SETTLEMENT)
        .json(&json!({
            "customer_id": SILVER,
            "payment_method": "card",
            "items": [
                { "menu_item_id": 1, "name": "Board game fee", "quantity": 4, "unit_price": "25.00", "category": "other" }
            ],
            "loyalty_points_to_redeem": 300
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["subtotal"], "100.00");
    assert_eq!(body["discount_amount"], "13.00");
    assert_eq!(body["tax_amount"], "8.00");
    assert_eq!(body["total_amount"], "95.00");
    assert_eq!(body["payment_method"], "card");
    assert_eq!(body["points_redeemed"], 300);
    assert_eq!(body["points_earned"], 95);
}

#[tokio::test]
async fn test_tax_on_undiscounted_prices() {
    let app = TestApp::new();

    let response = app
        .server
        .post(SETTLEMENT)
        .json(&json!({
            "customer_id": REGULAR,
            "items": [
                { "menu_item_id": 1, "name": "Burger", "quantity": 1, "unit_price": "20.00", "category": "food" },
                { "menu_item_id": 2, "name": "Stout", "quantity": 1, "unit_price": "10.00", "category": "alcohol" }
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["tax_amount"], "2.60");
    assert_eq!(body["total_amount"], "32.60");
    assert_eq!(body["payment_method"], "cash");
}

#[tokio::test]
async fn test_total_never_negative() {
    let app = TestApp::new();

    let response = app
        .server
        .post(SETTLEMENT)
        .json(&json!({
            "customer_id": GOLD,
            "items": [
                { "menu_item_id": 3, "name": "Espresso", "quantity": 1, "unit_price": "5.00" }
            ],
            "loyalty_points_to_redeem": 10000
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_amount"], "0.00");
    assert_eq!(body["points_earned"], 0);
}

#[tokio::test]
async fn test_redeeming_more_than_balance_is_bad_request() {
    let app = TestApp::new();

    app.server
        .post(SETTLEMENT)
        .json(&json!({
            "customer_id": SILVER,
            "items": [],
            "loyalty_points_to_redeem": 501
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_points_is_bad_request() {
    let app = TestApp::new();

    app.server
        .post(SETTLEMENT)
        .json(&json!({
            "customer_id": REGULAR,
            "items": [],
            "loyalty_points_to_redeem": -1
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_quantity_is_rejected() {
    let app = TestApp::new();

    let response = app
        .server
        .post(SETTLEMENT)
        .json(&json!({
            "customer_id": REGULAR,
            "items": [
                { "menu_item_id": 1, "name": "Tea", "quantity": 2, "unit_price": "3.00" },
                { "menu_item_id": 2, "name": "Cake", "quantity": 0, "unit_price": "4.00" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 10007);
    assert_eq!(body["message"], "items[1].quantity: Quantity must be at least 1");
    assert_eq!(body["errors"][0]["field"], "items[1].quantity");
    assert_eq!(body["errors"][0]["message"], "Quantity must be at least 1");
}

#[tokio::test]
async fn test_oversized_amount_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .server
        .post(SETTLEMENT)
        .json(&json!({
            "customer_id": REGULAR,
            "items": [
                { "menu_item_id": 1, "name": "Trophy", "quantity": 2, "unit_price": "79228162514264337593543950335" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 10002);
}

#[tokio::test]
async fn test_unknown_customer_is_not_found() {
    let app = TestApp::new();

    app.server
        .post(SETTLEMENT)
        .json(&json!({ "customer_id": 999, "items": [] }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
