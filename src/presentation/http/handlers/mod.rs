//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod events;
pub mod health;
pub mod orders;
pub mod reservations;
