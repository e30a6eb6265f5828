//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **EventRegistrationService**: Capacity-checked event registration and cancellation
//! - **OrderService**: Order settlement with discounts, tax and loyalty points
//! - **ReservationService**: Reservation eligibility checks

pub mod event_registration_service;
pub mod order_service;
pub mod reservation_service;

// Re-export event registration service types
pub use event_registration_service::{
    EventAvailability, EventRegistrationService, EventRegistrationServiceImpl, RegistrationError,
};

// Re-export order service types
pub use order_service::{OrderError, OrderService, OrderServiceImpl, SettleOrderDto, SettledOrder};

// Re-export reservation service types
pub use reservation_service::{ReservationError, ReservationService, ReservationServiceImpl};
