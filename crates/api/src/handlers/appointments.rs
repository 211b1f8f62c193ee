use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use barbershop_core::{
    availability::{validate_booking, SlotLabel},
    errors::BookingError,
    models::appointment::Appointment,
    time,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    middleware::{auth::SessionToken, error_handling::AppError},
    ApiState,
};

/// New start time for an existing appointment. `time` may be `"HH:MM"` or
/// `"hh:mm AM"`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveAppointmentRequest {
    pub barber_id: i64,
    pub date: NaiveDate,
    pub time: String,
}

/// Moves an appointment after checking that its whole service still fits the
/// shift without overlapping the barber's other appointments.
#[axum::debug_handler]
pub async fn reschedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Json(payload): Json<MoveAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let slot: SlotLabel = payload.time.parse()?;

    let appointments = state
        .backend
        .appointments_for_barber(payload.barber_id, payload.date, Some(token.clone()))
        .await?;
    let appointment = appointments
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| {
            BookingError::NotFound(format!(
                "Appointment {} for barber {} on {}",
                id, payload.barber_id, payload.date
            ))
        })?;

    if time::parse_24h(&appointment.start_time).ok() == Some(slot.minute_of_day()) {
        return Err(AppError(BookingError::Validation(
            "The new time must differ from the current one".to_string(),
        )));
    }

    let availability = state.backend.availability_for_date(payload.date).await?;
    let shift = availability
        .iter()
        .find(|a| a.barber_id == payload.barber_id)
        .ok_or_else(|| {
            BookingError::NotFound(format!(
                "Shift for barber {} on {}",
                payload.barber_id, payload.date
            ))
        })?
        .shift()?;

    validate_booking(
        &shift,
        &appointments,
        slot.minute_of_day(),
        appointment.duration_minutes,
        Some(id),
    )?;

    let new_time = slot.to_24h();
    let moved = state
        .backend
        .reschedule_appointment(id, &new_time, &token)
        .await?;

    info!(appointment_id = id, time = %new_time, "Appointment rescheduled");
    Ok(Json(moved))
}
