//! Reservation entity.
//!
//! A booking of a time slot (and optionally a table) for a party.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Reservation lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "confirmed" => Self::Confirmed,
            "cancelled" => Self::Cancelled,
            "completed" => Self::Completed,
            _ => Self::Pending,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

/// A table reservation request or booking.
///
/// `start_time < end_time` is required for a valid reservation; the
/// reservation validator reports it rather than the constructor rejecting it,
/// so callers can get a diagnostic reason back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unset until the reservation is stored
    pub id: Option<i64>,

    pub customer_id: i64,

    pub table_id: Option<i64>,

    pub reservation_date: NaiveDate,

    pub start_time: NaiveTime,

    pub end_time: NaiveTime,

    pub party_size: i32,

    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new(
        customer_id: i64,
        reservation_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        party_size: i32,
    ) -> Self {
        Self {
            id: None,
            customer_id,
            table_id: None,
            reservation_date,
            start_time,
            end_time,
            party_size,
            status: ReservationStatus::Pending,
        }
    }

    pub fn at_table(mut self, table_id: i64) -> Self {
        self.table_id = Some(table_id);
        self
    }
}
