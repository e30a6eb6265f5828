//! Unit of Work Pattern Implementation
//!
//! Provides transactional boundaries for database operations.
//! Ensures all operations within a business transaction succeed or fail together.

use sqlx::{PgPool, Postgres, Transaction};

use crate::shared::error::AppError;

/// Must be the first statement of the transaction.
const SET_SERIALIZABLE: &str = "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE";

/// Transaction context that wraps a SQLx transaction.
pub struct TransactionContext {
    tx: Transaction<'static, Postgres>,
}

impl TransactionContext {
    /// Create a new transaction context.
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// Get a reference to the underlying transaction for query execution.
    pub fn as_mut(&mut self) -> &mut Transaction<'static, Postgres> {
        &mut self.tx
    }

    /// Commit the transaction.
    ///
    /// Under SERIALIZABLE the commit itself may fail with a serialization
    /// failure; that surfaces as `AppError::WriteConflict`.
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::from_write)
    }

    /// Rollback the transaction.
    pub async fn rollback(self) -> Result<(), AppError> {
        self.tx.rollback().await.map_err(AppError::Database)
    }
}

/// PostgreSQL Unit of Work: hands out transactions from a pool.
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    /// Create from a PgPool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<TransactionContext, AppError> {
        let tx = self.pool.begin().await.map_err(AppError::Database)?;
        Ok(TransactionContext::new(tx))
    }

    /// Begin a SERIALIZABLE transaction.
    pub async fn begin_serializable(&self) -> Result<TransactionContext, AppError> {
        let mut ctx = self.begin().await?;
        sqlx::query(SET_SERIALIZABLE)
            .execute(&mut **ctx.as_mut())
            .await
            .map_err(AppError::Database)?;
        Ok(ctx)
    }
}
