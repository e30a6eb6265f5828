//! Request DTOs
//!
//! Data structures for API request bodies.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::application::services::SettleOrderDto;
use crate::domain::{OrderLineItem, PaymentMethod, Reservation, TaxCategory};

/// Event registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForEventRequest {
    #[validate(range(min = 1, message = "Customer ID must be positive"))]
    pub customer_id: i64,
}

/// One line of an order settlement request
#[derive(Debug, Deserialize, Validate)]
pub struct OrderItemRequest {
    pub menu_item_id: i64,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,

    #[validate(custom(function = "non_negative_price"))]
    pub unit_price: Decimal,

    #[serde(default)]
    pub category: TaxCategory,
}

/// Order settlement request
#[derive(Debug, Deserialize, Validate)]
pub struct SettleOrderRequest {
    #[validate(range(min = 1, message = "Customer ID must be positive"))]
    pub customer_id: i64,

    pub reservation_id: Option<i64>,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,

    #[serde(default)]
    pub loyalty_points_to_redeem: i64,
}

impl From<SettleOrderRequest> for SettleOrderDto {
    fn from(req: SettleOrderRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            reservation_id: req.reservation_id,
            payment_method: req.payment_method,
            items: req
                .items
                .into_iter()
                .map(|item| {
                    OrderLineItem::new(
                        item.menu_item_id,
                        item.name,
                        item.quantity,
                        item.unit_price,
                        item.category,
                    )
                })
                .collect(),
            loyalty_points_to_redeem: req.loyalty_points_to_redeem,
        }
    }
}

/// Reservation validation request
///
/// Times are `HH:MM:SS`. Party size and hours are checked by the reservation
/// rules, which report a reason instead of rejecting the request.
#[derive(Debug, Deserialize, Validate)]
pub struct ValidateReservationRequest {
    #[validate(range(min = 1, message = "Customer ID must be positive"))]
    pub customer_id: i64,

    pub table_id: Option<i64>,

    pub reservation_date: NaiveDate,

    pub start_time: NaiveTime,

    pub end_time: NaiveTime,

    pub party_size: i32,
}

impl ValidateReservationRequest {
    pub fn into_reservation(self) -> (Reservation, Option<i64>) {
        let reservation = Reservation::new(
            self.customer_id,
            self.reservation_date,
            self.start_time,
            self.end_time,
            self.party_size,
        );
        (reservation, self.table_id)
    }
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("Unit price cannot be negative".into());
        return Err(err);
    }
    Ok(())
}
