//! Event Registration Store Implementation
//!
//! PostgreSQL implementation of the event registration store. Registration
//! runs in a SERIALIZABLE transaction; the partial unique index
//! `ux_event_registrations_active` backs the one-active-registration rule.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::domain::{
    Event, EventRegistration, EventRegistrationStore, EventWithRegistrations,
    NewEventRegistration, PaymentStatus, RegistrationStatus, RegistrationTransaction,
};
use crate::infrastructure::database::{PgUnitOfWork, TransactionContext};
use crate::shared::error::AppError;

/// Database row representation matching the events table schema.
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: i64,
    title: String,
    description: Option<String>,
    scheduled_at: DateTime<Utc>,
    duration_minutes: i32,
    ticket_price: Decimal,
    max_participants: i32,
    created_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            description: row.description,
            scheduled_at: row.scheduled_at,
            duration_minutes: row.duration_minutes,
            ticket_price: row.ticket_price,
            max_participants: row.max_participants,
            created_at: row.created_at,
        }
    }
}

/// Database row representation matching the event_registrations table schema.
#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: i64,
    event_id: i64,
    customer_id: i64,
    registered_at: DateTime<Utc>,
    status: String,
    payment_status: String,
}

impl From<RegistrationRow> for EventRegistration {
    fn from(row: RegistrationRow) -> Self {
        EventRegistration {
            id: row.id,
            event_id: row.event_id,
            customer_id: row.customer_id,
            registered_at: row.registered_at,
            status: RegistrationStatus::from_str(&row.status),
            payment_status: PaymentStatus::from_str(&row.payment_status),
        }
    }
}

/// Load an event and all its registrations on one connection.
async fn load_event_with_registrations(
    conn: &mut PgConnection,
    event_id: i64,
) -> Result<Option<EventWithRegistrations>, AppError> {
    let event = sqlx::query_as::<_, EventRow>(
        r#"
        SELECT id, title, description, scheduled_at, duration_minutes,
               ticket_price, max_participants, created_at
        FROM events
        WHERE id = $1
        "#,
    )
    .bind(event_id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(event) = event else {
        return Ok(None);
    };

    let registrations = sqlx::query_as::<_, RegistrationRow>(
        r#"
        SELECT id, event_id, customer_id, registered_at, status, payment_status
        FROM event_registrations
        WHERE event_id = $1
        ORDER BY registered_at ASC, id ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(EventWithRegistrations {
        event: event.into(),
        registrations: registrations.into_iter().map(EventRegistration::from).collect(),
    }))
}

/// PostgreSQL event registration store.
#[derive(Clone)]
pub struct PgEventRegistrationStore {
    pool: PgPool,
    uow: PgUnitOfWork,
}

impl PgEventRegistrationStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl EventRegistrationStore for PgEventRegistrationStore {
    type Transaction = PgRegistrationTransaction;

    async fn begin_serializable(&self) -> Result<Self::Transaction, AppError> {
        let ctx = self.uow.begin_serializable().await?;
        Ok(PgRegistrationTransaction { ctx })
    }

    async fn find_event_with_registrations(
        &self,
        event_id: i64,
    ) -> Result<Option<EventWithRegistrations>, AppError> {
        let mut conn = self.pool.acquire().await?;
        load_event_with_registrations(&mut conn, event_id).await
    }

    async fn find_registrations(
        &self,
        event_id: i64,
        customer_id: i64,
    ) -> Result<Vec<EventRegistration>, AppError> {
        let rows = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT id, event_id, customer_id, registered_at, status, payment_status
            FROM event_registrations
            WHERE event_id = $1 AND customer_id = $2
            ORDER BY registered_at ASC, id ASC
            "#,
        )
        .bind(event_id)
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EventRegistration::from).collect())
    }

    async fn update_registration_status(
        &self,
        registration_id: i64,
        status: RegistrationStatus,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE event_registrations SET status = $2 WHERE id = $1")
            .bind(registration_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(AppError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Registration {} not found",
                registration_id
            )));
        }

        Ok(())
    }
}

/// A SERIALIZABLE transaction over the registration tables.
pub struct PgRegistrationTransaction {
    ctx: TransactionContext,
}

#[async_trait]
impl RegistrationTransaction for PgRegistrationTransaction {
    async fn load_event_with_registrations(
        &mut self,
        event_id: i64,
    ) -> Result<Option<EventWithRegistrations>, AppError> {
        load_event_with_registrations(&mut **self.ctx.as_mut(), event_id)
            .await
            .map_err(|e| match e {
                AppError::Database(db) => AppError::from_write(db),
                other => other,
            })
    }

    async fn insert_registration(
        &mut self,
        registration: &NewEventRegistration,
    ) -> Result<EventRegistration, AppError> {
        let row = sqlx::query_as::<_, RegistrationRow>(
            r#"
            INSERT INTO event_registrations
                (event_id, customer_id, registered_at, status, payment_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, customer_id, registered_at, status, payment_status
            "#,
        )
        .bind(registration.event_id)
        .bind(registration.customer_id)
        .bind(registration.registered_at)
        .bind(registration.status.as_str())
        .bind(registration.payment_status.as_str())
        .fetch_one(&mut **self.ctx.as_mut())
        .await
        .map_err(AppError::from_write)?;

        Ok(row.into())
    }

    async fn commit(self) -> Result<(), AppError> {
        self.ctx.commit().await
    }

    async fn rollback(self) -> Result<(), AppError> {
        self.ctx.rollback().await
    }
}
