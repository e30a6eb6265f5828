//! # Domain Entities
//!
//! Core domain entities representing the venue's business objects.
//!
//! ## Core Entities
//!
//! - **Customer**: Membership tier and loyalty balance
//! - **Table**: A reservable table with a seating capacity
//! - **Reservation**: A party's booking of a time slot
//! - **Order**: Food & drink order with derived monetary totals
//! - **Event**: Capacity-limited ticketed event and its registrations
//!
//! ## Repository Traits
//!
//! Data access contracts are defined here and implemented in the
//! infrastructure layer (PostgreSQL and in-memory).

mod customer;
mod event;
mod order;
mod reservation;
mod table;

pub use customer::{Customer, CustomerRepository, MembershipTier};

pub use table::{Table, TableRepository};

pub use reservation::{Reservation, ReservationStatus};

pub use order::{Order, OrderLineItem, OrderStatus, PaymentMethod, TaxCategory};

pub use event::{
    Event, EventRegistration, EventRegistrationStore, EventWithRegistrations,
    NewEventRegistration, PaymentStatus, RegistrationStatus, RegistrationTransaction,
};

#[cfg(test)]
pub use customer::MockCustomerRepository;

#[cfg(test)]
pub use table::MockTableRepository;
