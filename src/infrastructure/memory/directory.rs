//! In-memory customer and table repositories.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{Customer, CustomerRepository, Table, TableRepository};
use crate::shared::error::AppError;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<DashMap<i64, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.customers.get(&id).map(|c| c.value().clone()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTableRepository {
    tables: Arc<DashMap<i64, Table>>,
}

impl InMemoryTableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, table: Table) {
        self.tables.insert(table.id, table);
    }
}

#[async_trait]
impl TableRepository for InMemoryTableRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Table>, AppError> {
        Ok(self.tables.get(&id).map(|t| t.value().clone()))
    }
}
