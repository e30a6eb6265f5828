//! Reservation Service
//!
//! Checks a reservation request against the venue's rules, loading the
//! requested table when one is named.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Reservation, ReservationValidator, ReservationVerdict, TableRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Reservation service trait
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Validate a reservation, optionally at a specific table.
    async fn validate(
        &self,
        reservation: Reservation,
        table_id: Option<i64>,
    ) -> Result<ReservationVerdict, ReservationError>;
}

/// Reservation service errors
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Table not found")]
    TableNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for ReservationError {
    fn from(err: AppError) -> Self {
        ReservationError::Internal(err.to_string())
    }
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::TableNotFound => AppError::NotFound(err.to_string()),
            ReservationError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// ReservationService implementation
pub struct ReservationServiceImpl<T>
where
    T: TableRepository,
{
    table_repo: Arc<T>,
    validator: ReservationValidator,
}

impl<T> ReservationServiceImpl<T>
where
    T: TableRepository,
{
    pub fn new(table_repo: Arc<T>, validator: ReservationValidator) -> Self {
        Self {
            table_repo,
            validator,
        }
    }
}

#[async_trait]
impl<T> ReservationService for ReservationServiceImpl<T>
where
    T: TableRepository + 'static,
{
    async fn validate(
        &self,
        reservation: Reservation,
        table_id: Option<i64>,
    ) -> Result<ReservationVerdict, ReservationError> {
        let table = match table_id.or(reservation.table_id) {
            Some(id) => Some(
                self.table_repo
                    .find_by_id(id)
                    .await?
                    .ok_or(ReservationError::TableNotFound)?,
            ),
            None => None,
        };

        let verdict = self.validator.validate_reservation(&reservation, table.as_ref());

        metrics::record_reservation_validation(verdict.is_valid);
        debug!(
            customer_id = reservation.customer_id,
            party_size = reservation.party_size,
            table_id = table.as_ref().map(|t| t.id),
            is_valid = verdict.is_valid,
            reason = verdict.reason.as_deref(),
            "Reservation validated"
        );

        Ok(verdict)
    }
}
