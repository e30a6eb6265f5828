//! Ticketed event, event registration, and the registration store traits.
//!
//! Maps to the `events` and `event_registrations` tables in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Registration lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Registered,
    Attended,
    Cancelled,
}

impl RegistrationStatus {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "attended" => Self::Attended,
            "cancelled" => Self::Cancelled,
            _ => Self::Registered,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Attended => "attended",
            Self::Cancelled => "cancelled",
        }
    }

    /// Registered and Attended registrations hold a seat.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ticket payment status. Recorded only; payments are handled elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "paid" => Self::Paid,
            "refunded" => Self::Refunded,
            _ => Self::Pending,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
        }
    }

    /// Free events are settled on registration; paid ones start pending.
    pub fn for_ticket_price(price: Decimal) -> Self {
        if price > Decimal::ZERO {
            Self::Pending
        } else {
            Self::Paid
        }
    }
}

/// A capacity-limited, optionally ticketed event (tournaments, game nights).
///
/// Maps to the `events` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - title: VARCHAR(200) NOT NULL
/// - description: TEXT NULL
/// - scheduled_at: TIMESTAMPTZ NOT NULL
/// - duration_minutes: INTEGER NOT NULL
/// - ticket_price: NUMERIC(10,2) NOT NULL CHECK (ticket_price >= 0)
/// - max_participants: INTEGER NOT NULL CHECK (max_participants > 0)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,

    pub title: String,

    pub description: Option<String>,

    pub scheduled_at: DateTime<Utc>,

    pub duration_minutes: i32,

    pub ticket_price: Decimal,

    pub max_participants: i32,

    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        ticket_price: Decimal,
        max_participants: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            scheduled_at,
            duration_minutes: 120,
            ticket_price,
            max_participants,
            created_at: Utc::now(),
        }
    }
}

/// A customer's registration for an event.
///
/// Maps to the `event_registrations` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - event_id: BIGINT NOT NULL REFERENCES events(id)
/// - customer_id: BIGINT NOT NULL REFERENCES customers(id)
/// - registered_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - status: VARCHAR(16) NOT NULL
/// - payment_status: VARCHAR(16) NOT NULL
///
/// A partial unique index keeps one non-cancelled row per (event, customer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistration {
    pub id: i64,

    pub event_id: i64,

    pub customer_id: i64,

    pub registered_at: DateTime<Utc>,

    pub status: RegistrationStatus,

    pub payment_status: PaymentStatus,
}

/// Input for inserting a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventRegistration {
    pub event_id: i64,
    pub customer_id: i64,
    pub registered_at: DateTime<Utc>,
    pub status: RegistrationStatus,
    pub payment_status: PaymentStatus,
}

/// An event together with every registration it has, in any status.
#[derive(Debug, Clone, PartialEq)]
pub struct EventWithRegistrations {
    pub event: Event,
    pub registrations: Vec<EventRegistration>,
}

impl EventWithRegistrations {
    /// Registrations that hold a seat.
    pub fn active_registrations(&self) -> impl Iterator<Item = &EventRegistration> {
        self.registrations.iter().filter(|r| r.status.is_active())
    }

    pub fn current_participants(&self) -> i64 {
        self.active_registrations().count() as i64
    }

    pub fn available_spots(&self) -> i64 {
        (i64::from(self.event.max_participants) - self.current_participants()).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.current_participants() >= i64::from(self.event.max_participants)
    }

    /// The seat-holding registration of `customer_id`, if any.
    pub fn active_registration_for(&self, customer_id: i64) -> Option<&EventRegistration> {
        self.active_registrations()
            .find(|r| r.customer_id == customer_id)
    }
}

/// Durable store for events and registrations.
///
/// Capacity decisions must go through [`RegistrationTransaction`]; the plain
/// reads here may be stale.
#[async_trait]
pub trait EventRegistrationStore: Send + Sync {
    type Transaction: RegistrationTransaction;

    /// Begin a transaction at the strongest isolation the store offers.
    async fn begin_serializable(&self) -> Result<Self::Transaction, AppError>;

    /// Load an event and all its registrations outside any transaction.
    async fn find_event_with_registrations(
        &self,
        event_id: i64,
    ) -> Result<Option<EventWithRegistrations>, AppError>;

    /// All registrations of a customer for an event, oldest first.
    async fn find_registrations(
        &self,
        event_id: i64,
        customer_id: i64,
    ) -> Result<Vec<EventRegistration>, AppError>;

    /// Set the status of one registration.
    async fn update_registration_status(
        &self,
        registration_id: i64,
        status: RegistrationStatus,
    ) -> Result<(), AppError>;
}

/// An open serializable transaction over the registration tables.
///
/// Dropping a transaction without committing discards its writes.
#[async_trait]
pub trait RegistrationTransaction: Send {
    /// Load an event and all its registrations as seen by this transaction.
    async fn load_event_with_registrations(
        &mut self,
        event_id: i64,
    ) -> Result<Option<EventWithRegistrations>, AppError>;

    /// Insert a registration. Fails with `AppError::WriteConflict` when the
    /// (event, customer) pair already holds an active registration.
    async fn insert_registration(
        &mut self,
        registration: &NewEventRegistration,
    ) -> Result<EventRegistration, AppError>;

    /// Commit. Fails with `AppError::WriteConflict` when a concurrent
    /// transaction invalidated what this one read.
    async fn commit(self) -> Result<(), AppError>;

    async fn rollback(self) -> Result<(), AppError>;
}
