//! Event Registration Service
//!
//! Capacity-checked registration for ticketed events. Admission decisions are
//! made only inside a SERIALIZABLE store transaction; a store-level write
//! conflict is reported as a business conflict, never retried.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    CustomerRepository, Event, EventRegistration, EventRegistrationStore, NewEventRegistration,
    PaymentStatus, RegistrationStatus, RegistrationTransaction,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Event registration operations.
#[async_trait]
pub trait EventRegistrationService: Send + Sync {
    /// Register a customer for an event.
    async fn register(
        &self,
        event_id: i64,
        customer_id: i64,
    ) -> Result<EventRegistration, RegistrationError>;

    /// Cancel a customer's registration for an event.
    async fn cancel(&self, event_id: i64, customer_id: i64) -> Result<(), RegistrationError>;

    /// All registrations of an event, oldest first.
    async fn list_participants(
        &self,
        event_id: i64,
    ) -> Result<Vec<EventRegistration>, RegistrationError>;

    /// Current seat usage. Informational only; may be stale by the time a
    /// registration runs.
    async fn event_availability(&self, event_id: i64) -> Result<EventAvailability, RegistrationError>;
}

/// Seat usage snapshot for an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAvailability {
    pub event: Event,
    pub current_participants: i64,
    pub available_spots: i64,
    pub is_full: bool,
}

/// Event registration errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Customer not found")]
    CustomerNotFound,

    #[error("Event not found")]
    EventNotFound,

    #[error("Registration not found")]
    RegistrationNotFound,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("event full")]
    EventFull,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistrationError {
    fn metric_label(&self) -> &'static str {
        match self {
            Self::CustomerNotFound | Self::EventNotFound | Self::RegistrationNotFound => {
                "not_found"
            }
            Self::AlreadyRegistered => "already_registered",
            Self::EventFull => "event_full",
            Self::Internal(_) => "error",
        }
    }
}

impl From<AppError> for RegistrationError {
    fn from(err: AppError) -> Self {
        RegistrationError::Internal(err.to_string())
    }
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::CustomerNotFound
            | RegistrationError::EventNotFound
            | RegistrationError::RegistrationNotFound => AppError::NotFound(err.to_string()),
            RegistrationError::AlreadyRegistered | RegistrationError::EventFull => {
                AppError::Conflict(err.to_string())
            }
            RegistrationError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Event registration service implementation.
pub struct EventRegistrationServiceImpl<S, C>
where
    S: EventRegistrationStore,
    C: CustomerRepository,
{
    store: Arc<S>,
    customer_repo: Arc<C>,
}

impl<S, C> EventRegistrationServiceImpl<S, C>
where
    S: EventRegistrationStore,
    C: CustomerRepository,
{
    /// Create a new EventRegistrationServiceImpl.
    pub fn new(store: Arc<S>, customer_repo: Arc<C>) -> Self {
        Self {
            store,
            customer_repo,
        }
    }

    /// Steps 3-7 of a registration, inside an open transaction.
    ///
    /// Business rejections come back as `Ok(Err(_))` so the caller can roll
    /// back before reporting them; store failures come back as `Err(_)`.
    async fn admit(
        tx: &mut S::Transaction,
        event_id: i64,
        customer_id: i64,
    ) -> Result<Result<EventRegistration, RegistrationError>, AppError> {
        let Some(event) = tx.load_event_with_registrations(event_id).await? else {
            return Ok(Err(RegistrationError::EventNotFound));
        };

        if event.active_registration_for(customer_id).is_some() {
            return Ok(Err(RegistrationError::AlreadyRegistered));
        }

        if event.is_full() {
            return Ok(Err(RegistrationError::EventFull));
        }

        let registration = NewEventRegistration {
            event_id,
            customer_id,
            registered_at: Utc::now(),
            status: RegistrationStatus::Registered,
            payment_status: PaymentStatus::for_ticket_price(event.event.ticket_price),
        };

        let created = tx.insert_registration(&registration).await?;
        Ok(Ok(created))
    }

    /// Work out which conflict a concurrent winner caused, from one fresh read.
    ///
    /// Defaults to `AlreadyRegistered` when the read cannot tell.
    async fn classify_conflict(&self, event_id: i64, customer_id: i64) -> RegistrationError {
        match self.store.find_event_with_registrations(event_id).await {
            Ok(Some(event)) => {
                if event.active_registration_for(customer_id).is_none() && event.is_full() {
                    RegistrationError::EventFull
                } else {
                    RegistrationError::AlreadyRegistered
                }
            }
            Ok(None) => RegistrationError::EventNotFound,
            Err(e) => {
                warn!(event_id, customer_id, error = %e, "Could not classify write conflict");
                RegistrationError::AlreadyRegistered
            }
        }
    }

    async fn rollback_quietly(tx: S::Transaction, event_id: i64) {
        if let Err(e) = tx.rollback().await {
            warn!(event_id, error = %e, "Rollback failed");
        }
    }

    async fn register_inner(
        &self,
        event_id: i64,
        customer_id: i64,
    ) -> Result<EventRegistration, RegistrationError> {
        self.customer_repo
            .find_by_id(customer_id)
            .await?
            .ok_or(RegistrationError::CustomerNotFound)?;

        let mut tx = self.store.begin_serializable().await?;

        match Self::admit(&mut tx, event_id, customer_id).await {
            Ok(Ok(registration)) => match tx.commit().await {
                Ok(()) => Ok(registration),
                Err(e) if e.is_write_conflict() => {
                    debug!(event_id, customer_id, error = %e, "Commit lost a concurrent race");
                    Err(self.classify_conflict(event_id, customer_id).await)
                }
                Err(e) => Err(e.into()),
            },
            Ok(Err(rejection)) => {
                Self::rollback_quietly(tx, event_id).await;
                Err(rejection)
            }
            Err(e) if e.is_write_conflict() => {
                debug!(event_id, customer_id, error = %e, "Insert hit a concurrent writer");
                Self::rollback_quietly(tx, event_id).await;
                Err(self.classify_conflict(event_id, customer_id).await)
            }
            Err(e) => {
                Self::rollback_quietly(tx, event_id).await;
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl<S, C> EventRegistrationService for EventRegistrationServiceImpl<S, C>
where
    S: EventRegistrationStore + 'static,
    C: CustomerRepository + 'static,
{
    async fn register(
        &self,
        event_id: i64,
        customer_id: i64,
    ) -> Result<EventRegistration, RegistrationError> {
        let result = self.register_inner(event_id, customer_id).await;

        match &result {
            Ok(registration) => {
                metrics::record_registration("created");
                info!(
                    event_id,
                    customer_id,
                    registration_id = registration.id,
                    payment_status = registration.payment_status.as_str(),
                    "Customer registered for event"
                );
            }
            Err(RegistrationError::Internal(msg)) => {
                metrics::record_registration("error");
                tracing::error!(event_id, customer_id, error = %msg, "Registration failed");
            }
            Err(e) => {
                metrics::record_registration(e.metric_label());
                info!(event_id, customer_id, reason = %e, "Registration rejected");
            }
        }

        result
    }

    async fn cancel(&self, event_id: i64, customer_id: i64) -> Result<(), RegistrationError> {
        let registrations = self.store.find_registrations(event_id, customer_id).await?;

        if registrations.is_empty() {
            return Err(RegistrationError::RegistrationNotFound);
        }

        let Some(active) = registrations.iter().find(|r| r.status.is_active()) else {
            debug!(event_id, customer_id, "Registration already cancelled");
            return Ok(());
        };

        match self
            .store
            .update_registration_status(active.id, RegistrationStatus::Cancelled)
            .await
        {
            Ok(()) => {}
            Err(AppError::NotFound(_)) => return Err(RegistrationError::RegistrationNotFound),
            Err(e) => return Err(e.into()),
        }

        info!(
            event_id,
            customer_id,
            registration_id = active.id,
            "Event registration cancelled"
        );
        Ok(())
    }

    async fn list_participants(
        &self,
        event_id: i64,
    ) -> Result<Vec<EventRegistration>, RegistrationError> {
        let event = self
            .store
            .find_event_with_registrations(event_id)
            .await?
            .ok_or(RegistrationError::EventNotFound)?;

        let mut registrations = event.registrations;
        registrations.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(registrations)
    }

    async fn event_availability(&self, event_id: i64) -> Result<EventAvailability, RegistrationError> {
        let event = self
            .store
            .find_event_with_registrations(event_id)
            .await?
            .ok_or(RegistrationError::EventNotFound)?;

        Ok(EventAvailability {
            current_participants: event.current_participants(),
            available_spots: event.available_spots(),
            is_full: event.is_full(),
            event: event.event,
        })
    }
}
