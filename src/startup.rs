//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;

use crate::application::services::{
    EventRegistrationService, EventRegistrationServiceImpl, OrderService, OrderServiceImpl,
    ReservationService, ReservationServiceImpl,
};
use crate::config::Settings;
use crate::domain::{ReservationRules, ReservationValidator};
use crate::infrastructure::database;
use crate::infrastructure::memory::{
    InMemoryCustomerRepository, InMemoryEventStore, InMemoryTableRepository,
};
use crate::infrastructure::repositories::{
    PgCustomerRepository, PgEventRegistrationStore, PgTableRepository,
};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Present when backed by PostgreSQL; used by the readiness probe
    pub db: Option<PgPool>,
    pub events: Arc<dyn EventRegistrationService>,
    pub orders: Arc<dyn OrderService>,
    pub reservations: Arc<dyn ReservationService>,
}

impl AppState {
    /// Services backed by PostgreSQL repositories.
    pub fn postgres(db: PgPool, rules: ReservationRules) -> Self {
        let customers = Arc::new(PgCustomerRepository::new(db.clone()));
        let tables = Arc::new(PgTableRepository::new(db.clone()));
        let store = Arc::new(PgEventRegistrationStore::new(db.clone()));

        Self {
            events: Arc::new(EventRegistrationServiceImpl::new(store, customers.clone())),
            orders: Arc::new(OrderServiceImpl::new(customers)),
            reservations: Arc::new(ReservationServiceImpl::new(
                tables,
                ReservationValidator::new(rules),
            )),
            db: Some(db),
        }
    }

    /// Services backed by process-local stores.
    pub fn in_memory(
        store: InMemoryEventStore,
        customers: InMemoryCustomerRepository,
        tables: InMemoryTableRepository,
        rules: ReservationRules,
    ) -> Self {
        let customers = Arc::new(customers);

        Self {
            db: None,
            events: Arc::new(EventRegistrationServiceImpl::new(
                Arc::new(store),
                customers.clone(),
            )),
            orders: Arc::new(OrderServiceImpl::new(customers)),
            reservations: Arc::new(ReservationServiceImpl::new(
                Arc::new(tables),
                ReservationValidator::new(rules),
            )),
        }
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        // Create database pool
        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to connect to PostgreSQL")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        let state = AppState::postgres(db, settings.reservation);

        // Build router with middleware
        let router = routes::create_router(state).layer(
            ServiceBuilder::new()
                .layer(logging::create_trace_layer())
                .layer(CompressionLayer::new())
                .layer(cors::create_cors_layer(&settings.cors)),
        );

        // Bind to address
        let listener = TcpListener::bind(settings.server_addr())
            .await
            .with_context(|| format!("Failed to bind {}", settings.server_addr()))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
