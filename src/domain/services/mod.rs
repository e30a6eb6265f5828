//! # Domain Services
//!
//! Domain services encapsulate business rules that don't belong to a single
//! entity. They are pure: no I/O, no shared state, safe to call concurrently.
//!
//! ## Services
//!
//! - **ReservationValidator**: Party size, date, business hours and table capacity rules
//! - **OrderTotalCalculator**: Subtotal, discounts, tax and loyalty point arithmetic

mod order_calculator;
mod reservation_validator;

pub use order_calculator::*;
pub use reservation_validator::*;
