//! In-Memory Stores
//!
//! Process-local implementations of the repository and store traits, used
//! for tests and for running the service without PostgreSQL.

mod directory;
mod event_store;

pub use directory::{InMemoryCustomerRepository, InMemoryTableRepository};
pub use event_store::{InMemoryEventStore, InMemoryRegistrationTransaction};
