//! Event Registration Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::RegisterForEventRequest;
use crate::application::dto::response::{
    EventAvailabilityResponse, ParticipantListResponse, RegistrationResponse,
};
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Register a customer for an event
pub async fn register(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(body): Json<RegisterForEventRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    validate_request(&body)?;

    let registration = state.events.register(event_id, body.customer_id).await?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(registration))))
}

/// Cancel a customer's registration
pub async fn cancel(
    State(state): State<AppState>,
    Path((event_id, customer_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state.events.cancel(event_id, customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List every registration of an event, oldest first
pub async fn list_participants(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<ParticipantListResponse>, AppError> {
    let registrations = state.events.list_participants(event_id).await?;

    Ok(Json(ParticipantListResponse {
        event_id,
        participants: registrations
            .into_iter()
            .map(RegistrationResponse::from)
            .collect(),
    }))
}

/// Current seat usage of an event
pub async fn availability(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventAvailabilityResponse>, AppError> {
    let availability = state.events.event_availability(event_id).await?;
    Ok(Json(EventAvailabilityResponse::from(availability)))
}
