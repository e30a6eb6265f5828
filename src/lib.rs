//! # Game Café Library
//!
//! Operations backend for a café / board-game venue:
//! - Capacity-limited event registration with serializable admission
//! - Order settlement (membership discount, loyalty points, tax)
//! - Reservation eligibility checks
//! - RESTful HTTP API over PostgreSQL or in-memory stores
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, pure rule engines and store traits
//! - **Application Layer**: Services orchestrating the rules, and DTOs
//! - **Infrastructure Layer**: PostgreSQL and in-memory stores, metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! game_cafe/
//! +-- config/         Configuration management
//! +-- domain/         Entities, rule engines, and store traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, in-memory stores, metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
