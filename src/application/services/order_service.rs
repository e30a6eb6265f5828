//! Order Service
//!
//! Prices an order for a customer: membership discount, loyalty redemption,
//! tax and the loyalty points the purchase earns.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::domain::{
    CustomerRepository, Order, OrderLineItem, OrderTotalCalculator, PaymentMethod, PricingError,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Order service trait
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Compute every monetary field of an order and the points it earns.
    async fn settle(&self, request: SettleOrderDto) -> Result<SettledOrder, OrderError>;
}

/// Settle order input
#[derive(Debug, Clone)]
pub struct SettleOrderDto {
    pub customer_id: i64,
    pub reservation_id: Option<i64>,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderLineItem>,
    pub loyalty_points_to_redeem: i64,
}

/// A priced order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettledOrder {
    pub order: Order,
    pub points_redeemed: i64,
    pub points_earned: i64,
}

/// Order service errors
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Customer not found")]
    CustomerNotFound,

    #[error("Customer has {available} loyalty points, cannot redeem {requested}")]
    InsufficientLoyaltyPoints { available: i64, requested: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for OrderError {
    fn from(err: AppError) -> Self {
        OrderError::Internal(err.to_string())
    }
}

impl From<PricingError> for OrderError {
    fn from(err: PricingError) -> Self {
        OrderError::InvalidArgument(err.to_string())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidArgument(_) | OrderError::InsufficientLoyaltyPoints { .. } => {
                AppError::BadRequest(err.to_string())
            }
            OrderError::CustomerNotFound => AppError::NotFound(err.to_string()),
            OrderError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// OrderService implementation
pub struct OrderServiceImpl<C>
where
    C: CustomerRepository,
{
    customer_repo: Arc<C>,
}

impl<C> OrderServiceImpl<C>
where
    C: CustomerRepository,
{
    pub fn new(customer_repo: Arc<C>) -> Self {
        Self { customer_repo }
    }
}

#[async_trait]
impl<C> OrderService for OrderServiceImpl<C>
where
    C: CustomerRepository + 'static,
{
    async fn settle(&self, request: SettleOrderDto) -> Result<SettledOrder, OrderError> {
        let points = request.loyalty_points_to_redeem;
        if points < 0 {
            return Err(PricingError::NegativeLoyaltyPoints(points).into());
        }

        let customer = self
            .customer_repo
            .find_by_id(request.customer_id)
            .await?
            .ok_or(OrderError::CustomerNotFound)?;

        if !OrderTotalCalculator::validate_loyalty_redemption(&customer, points) {
            return Err(OrderError::InsufficientLoyaltyPoints {
                available: customer.loyalty_points,
                requested: points,
            });
        }

        let mut order = Order::new(customer.id, request.items)
            .with_reservation(request.reservation_id)
            .with_payment_method(request.payment_method);

        OrderTotalCalculator::calculate_order_totals(&mut order, &customer, points)?;

        let points_earned = OrderTotalCalculator::calculate_loyalty_points_earned(order.total_amount);

        metrics::record_order_settlement();
        info!(
            customer_id = customer.id,
            tier = customer.membership_tier.as_str(),
            total = %order.total_amount,
            points_redeemed = points,
            points_earned,
            "Order settled"
        );

        Ok(SettledOrder {
            order,
            points_redeemed: points,
            points_earned,
        })
    }
}
