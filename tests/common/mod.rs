//! Common Test Utilities
//!
//! Test application wired to in-memory stores, with seed data.

use axum_test::TestServer;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use game_cafe::domain::{Customer, Event, MembershipTier, ReservationRules, Table};
use game_cafe::infrastructure::memory::{
    InMemoryCustomerRepository, InMemoryEventStore, InMemoryTableRepository,
};
use game_cafe::presentation::http::routes::create_router;
use game_cafe::startup::AppState;

/// Free event with room for two
pub const SMALL_EVENT: i64 = 1;
/// Ticketed event with a single seat
pub const SINGLE_SEAT_EVENT: i64 = 2;

/// Customer without membership or points
pub const REGULAR: i64 = 10;
/// Silver member with 500 points
pub const SILVER: i64 = 11;
/// Gold member with 10,000 points
pub const GOLD: i64 = 12;

/// Four-top table
pub const TABLE_FOUR: i64 = 100;

/// Test application builder
pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryEventStore,
}

impl TestApp {
    /// Create a test application over seeded in-memory stores
    pub fn new() -> Self {
        let store = InMemoryEventStore::new();
        let starts = Utc::now() + Duration::days(7);
        store.insert_event(Event::new(SMALL_EVENT, "Catan Night", starts, Decimal::ZERO, 2));
        store.insert_event(Event::new(
            SINGLE_SEAT_EVENT,
            "Chess Simul",
            starts,
            Decimal::new(1500, 2),
            1,
        ));

        let customers = InMemoryCustomerRepository::new();
        customers.insert(Customer::new(REGULAR, "Robin", "robin@example.com"));
        customers.insert(
            Customer::new(SILVER, "Sasha", "sasha@example.com")
                .with_tier(MembershipTier::Silver)
                .with_loyalty_points(500),
        );
        customers.insert(
            Customer::new(GOLD, "Gale", "gale@example.com")
                .with_tier(MembershipTier::Gold)
                .with_loyalty_points(10_000),
        );

        let tables = InMemoryTableRepository::new();
        tables.insert(Table::new(TABLE_FOUR, "T4", 4));

        let state = AppState::in_memory(
            store.clone(),
            customers,
            tables,
            ReservationRules::default(),
        );
        let server = TestServer::new(create_router(state)).expect("test server");

        Self { server, store }
    }
}
