//! Customer Repository Implementation
//!
//! PostgreSQL implementation of the CustomerRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Customer, CustomerRepository, MembershipTier};
use crate::shared::error::AppError;

/// Database row representation matching the customers table schema.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    membership_tier: String,
    loyalty_points: i64,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            membership_tier: MembershipTier::from_str(&row.membership_tier),
            loyalty_points: row.loyalty_points,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL customer repository implementation.
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    /// Create a new PgCustomerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, membership_tier, loyalty_points, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }
}
