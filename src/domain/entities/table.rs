//! Dining table entity and repository trait.
//!
//! Maps to the `dining_tables` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A table customers can reserve.
///
/// Maps to the `dining_tables` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - label: VARCHAR(32) NOT NULL UNIQUE
/// - seating_capacity: INTEGER NOT NULL CHECK (seating_capacity > 0)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,

    /// Label shown on the floor plan (e.g. "T4", "Window 2")
    pub label: String,

    pub seating_capacity: i32,
}

impl Table {
    pub fn new(id: i64, label: impl Into<String>, seating_capacity: i32) -> Self {
        Self {
            id,
            label: label.into(),
            seating_capacity,
        }
    }

    /// Whether a party of `party_size` fits at this table.
    pub fn seats(&self, party_size: i32) -> bool {
        self.seating_capacity >= party_size
    }
}

/// Repository trait for Table data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Find a table by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Table>, AppError>;
}
