//! Reservation Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::ValidateReservationRequest;
use crate::application::dto::response::ReservationVerdictResponse;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Check a reservation request against the venue's rules
///
/// An ineligible reservation is still a 200; the verdict carries the reason.
pub async fn validate_reservation(
    State(state): State<AppState>,
    Json(body): Json<ValidateReservationRequest>,
) -> Result<Json<ReservationVerdictResponse>, AppError> {
    validate_request(&body)?;

    let (reservation, table_id) = body.into_reservation();
    let verdict = state.reservations.validate(reservation, table_id).await?;

    Ok(Json(ReservationVerdictResponse::from(verdict)))
}
