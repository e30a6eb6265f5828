//! Order Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::SettleOrderRequest;
use crate::application::dto::response::SettledOrderResponse;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Price an order: discounts, tax, and loyalty points earned
pub async fn settle_order(
    State(state): State<AppState>,
    Json(body): Json<SettleOrderRequest>,
) -> Result<Json<SettledOrderResponse>, AppError> {
    validate_request(&body)?;

    let settled = state.orders.settle(body.into()).await?;

    Ok(Json(SettledOrderResponse::from(settled)))
}
