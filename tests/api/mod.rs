//! API Tests

mod events_tests;
mod health_tests;
mod orders_tests;
mod reservations_tests;
