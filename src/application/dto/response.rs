//! Response DTOs
//!
//! Data structures for API response bodies.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::services::{EventAvailability, SettledOrder};
use crate::domain::{EventRegistration, OrderLineItem, PaymentMethod, ReservationVerdict};

/// Event registration response
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub id: i64,
    pub event_id: i64,
    pub customer_id: i64,
    pub registered_at: String,
    pub status: String,
    pub payment_status: String,
}

impl From<EventRegistration> for RegistrationResponse {
    fn from(registration: EventRegistration) -> Self {
        Self {
            id: registration.id,
            event_id: registration.event_id,
            customer_id: registration.customer_id,
            registered_at: registration.registered_at.to_rfc3339(),
            status: registration.status.as_str().to_string(),
            payment_status: registration.payment_status.as_str().to_string(),
        }
    }
}

/// Participant list response
#[derive(Debug, Serialize)]
pub struct ParticipantListResponse {
    pub event_id: i64,
    pub participants: Vec<RegistrationResponse>,
}

/// Event availability response
#[derive(Debug, Serialize)]
pub struct EventAvailabilityResponse {
    pub event_id: i64,
    pub title: String,
    pub scheduled_at: String,
    pub ticket_price: Decimal,
    pub max_participants: i32,
    pub current_participants: i64,
    pub available_spots: i64,
    pub is_full: bool,
}

impl From<EventAvailability> for EventAvailabilityResponse {
    fn from(availability: EventAvailability) -> Self {
        let event = availability.event;
        Self {
            event_id: event.id,
            title: event.title,
            scheduled_at: event.scheduled_at.to_rfc3339(),
            ticket_price: event.ticket_price,
            max_participants: event.max_participants,
            current_participants: availability.current_participants,
            available_spots: availability.available_spots,
            is_full: availability.is_full,
        }
    }
}

/// Settled order response
#[derive(Debug, Serialize)]
pub struct SettledOrderResponse {
    pub customer_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<i64>,
    pub items: Vec<OrderLineItem>,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub points_redeemed: i64,
    pub points_earned: i64,
}

impl From<SettledOrder> for SettledOrderResponse {
    fn from(settled: SettledOrder) -> Self {
        let order = settled.order;
        Self {
            customer_id: order.customer_id,
            reservation_id: order.reservation_id,
            items: order.items,
            subtotal: order.subtotal,
            discount_amount: order.discount_amount,
            tax_amount: order.tax_amount,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            points_redeemed: settled.points_redeemed,
            points_earned: settled.points_earned,
        }
    }
}

/// Reservation verdict response
#[derive(Debug, Serialize)]
pub struct ReservationVerdictResponse {
    pub is_valid: bool,
    pub reason: Option<String>,
}

impl From<ReservationVerdict> for ReservationVerdictResponse {
    fn from(verdict: ReservationVerdict) -> Self {
        Self {
            is_valid: verdict.is_valid,
            reason: verdict.reason,
        }
    }
}
