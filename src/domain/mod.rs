//! # Domain Layer
//!
//! The domain layer contains the venue's core business rules.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Customers, tables, reservations, orders, events
//! - **services**: Pure rule engines (reservation validation, order totals)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository and store traits define data access contracts
//! - Monetary values are `rust_decimal::Decimal`, never floats

pub mod entities;
pub mod services;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
