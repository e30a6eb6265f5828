//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgCustomerRepository** - Customer membership and loyalty lookup
//! - **PgTableRepository** - Table seating capacity lookup
//! - **PgEventRegistrationStore** - Events and registrations, with
//!   SERIALIZABLE registration transactions
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{
//!     PgCustomerRepository, PgEventRegistrationStore, PgTableRepository,
//! };
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let customers = PgCustomerRepository::new(pool.clone());
//!     let tables = PgTableRepository::new(pool.clone());
//!     let events = PgEventRegistrationStore::new(pool);
//! }
//! ```

pub mod customer_repository;
pub mod event_repository;
pub mod table_repository;

pub use customer_repository::PgCustomerRepository;
pub use event_repository::{PgEventRegistrationStore, PgRegistrationTransaction};
pub use table_repository::PgTableRepository;
