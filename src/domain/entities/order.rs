//! Food & drink order aggregate.
//!
//! The monetary fields (`subtotal`, `discount_amount`, `tax_amount`,
//! `total_amount`) are derived values. They are only ever written together by
//! the order total calculator; nothing patches them individually.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax category a catalog item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaxCategory {
    #[default]
    Food,
    Alcohol,
    Other,
}

impl TaxCategory {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "alcohol" => Self::Alcohol,
            "other" => Self::Other,
            _ => Self::Food,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Alcohol => "alcohol",
            Self::Other => "other",
        }
    }

    /// Sales tax rate: 10% for alcohol, 8% for everything else.
    pub fn tax_rate(&self) -> Decimal {
        match self {
            Self::Alcohol => Decimal::new(10, 2),
            Self::Food | Self::Other => Decimal::new(8, 2),
        }
    }
}

/// How the customer pays. Recorded only; no payment is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Mobile,
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Served,
    Completed,
    Cancelled,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub menu_item_id: i64,

    pub name: String,

    /// Always > 0
    pub quantity: i32,

    /// Price per unit at the time of ordering, >= 0
    pub unit_price: Decimal,

    /// Inherited from the catalog item
    pub category: TaxCategory,
}

impl OrderLineItem {
    pub fn new(
        menu_item_id: i64,
        name: impl Into<String>,
        quantity: i32,
        unit_price: Decimal,
        category: TaxCategory,
    ) -> Self {
        Self {
            menu_item_id,
            name: name.into(),
            quantity,
            unit_price,
            category,
        }
    }

    /// `quantity × unit_price`, before any discount.
    ///
    /// `None` when the product does not fit in a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// An order with its line items and derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unset until the order is stored
    pub id: Option<i64>,

    pub customer_id: i64,

    pub reservation_id: Option<i64>,

    pub items: Vec<OrderLineItem>,

    pub subtotal: Decimal,

    pub discount_amount: Decimal,

    pub tax_amount: Decimal,

    pub total_amount: Decimal,

    pub payment_method: PaymentMethod,

    pub status: OrderStatus,
}

impl Order {
    /// Create a pending order with zeroed totals.
    pub fn new(customer_id: i64, items: Vec<OrderLineItem>) -> Self {
        Self {
            id: None,
            customer_id,
            reservation_id: None,
            items,
            subtotal: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            payment_method: PaymentMethod::default(),
            status: OrderStatus::default(),
        }
    }

    pub fn with_reservation(mut self, reservation_id: Option<i64>) -> Self {
        self.reservation_id = reservation_id;
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    /// Zero all derived monetary fields.
    pub fn reset_totals(&mut self) {
        self.subtotal = Decimal::ZERO;
        self.discount_amount = Decimal::ZERO;
        self.tax_amount = Decimal::ZERO;
        self.total_amount = Decimal::ZERO;
    }
}
