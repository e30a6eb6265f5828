//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/events", event_routes())
        .route("/orders/settlement", post(handlers::orders::settle_order))
        .route(
            "/reservations/validate",
            post(handlers::reservations::validate_reservation),
        )
}

/// Event registration routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/{event_id}/registrations", post(handlers::events::register))
        .route(
            "/{event_id}/registrations/{customer_id}",
            delete(handlers::events::cancel),
        )
        .route(
            "/{event_id}/participants",
            get(handlers::events::list_participants),
        )
        .route(
            "/{event_id}/availability",
            get(handlers::events::availability),
        )
}
