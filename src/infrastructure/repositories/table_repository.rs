//! Table Repository Implementation
//!
//! PostgreSQL implementation of the TableRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Table, TableRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct TableRow {
    id: i64,
    label: String,
    seating_capacity: i32,
}

/// PostgreSQL table repository implementation.
#[derive(Clone)]
pub struct PgTableRepository {
    pool: PgPool,
}

impl PgTableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TableRepository for PgTableRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Table>, AppError> {
        let row = sqlx::query_as::<_, TableRow>(
            "SELECT id, label, seating_capacity FROM dining_tables WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Table::new(r.id, r.label, r.seating_capacity)))
    }
}
