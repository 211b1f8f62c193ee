use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use barbershop_core::{
    availability::{compute_available_slots, SlotLabel, WorkShift},
    errors::BookingError,
    models::{appointment::Appointment, availability::BarberAvailability},
    time::MINUTES_PER_DAY,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    middleware::{auth::bearer_from_headers, error_handling::AppError},
    ApiState,
};

/// Open start times of one barber.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarberSlots {
    pub barber_id: i64,
    pub barber_name: String,
    pub start_time: String,
    pub end_time: String,
    pub slots: Vec<SlotLabel>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub barber_id: i64,
    pub date: NaiveDate,
    pub available: bool,
    pub slots: Vec<SlotLabel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    pub service_minutes: Option<u32>,
    pub exclude_id: Option<i64>,
}

/// Everything the calculator needs, supplied by the caller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRequest {
    pub barber_id: i64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub candidate_slots: Option<Vec<String>>,
    #[serde(default)]
    pub service_minutes: Option<u32>,
    #[serde(default)]
    pub exclude_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResponse {
    pub barber_id: i64,
    pub available: bool,
    pub slots: Vec<SlotLabel>,
}

/// A service lasts at least a minute and at most a day.
fn check_service_minutes(service_minutes: Option<u32>) -> Result<(), AppError> {
    match service_minutes {
        Some(minutes) if minutes == 0 || minutes > MINUTES_PER_DAY => {
            Err(AppError(BookingError::Validation(format!(
                "serviceMinutes must be between 1 and {MINUTES_PER_DAY}, got {minutes}"
            ))))
        }
        _ => Ok(()),
    }
}

/// The shift of a backend availability row, or `None` when its times are
/// unusable.
fn usable_shift(availability: &BarberAvailability) -> Option<WorkShift> {
    match availability.shift() {
        Ok(shift) => Some(shift),
        Err(e) => {
            warn!(barber_id = availability.barber_id, "Ignoring shift: {}", e);
            None
        }
    }
}

/// Bookable barbers on `date` with the start times the backend offers.
#[axum::debug_handler]
pub async fn list_availability(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<BarberSlots>>, AppError> {
    let availability = state.backend.availability_for_date(date).await?;

    let barbers = availability
        .iter()
        .filter(|a| a.is_bookable())
        .filter_map(|a| {
            let shift = usable_shift(a)?;
            let slots =
                compute_available_slots(Some(&shift), &[], Some(&a.available_slots), None, None);
            Some(BarberSlots {
                barber_id: a.barber_id,
                barber_name: a.barber_name.clone(),
                start_time: a.start_time.clone(),
                end_time: a.end_time.clone(),
                slots,
            })
        })
        .filter(|b| !b.slots.is_empty())
        .collect::<Vec<_>>();

    debug!(%date, barbers = barbers.len(), "Listed availability");
    Ok(Json(barbers))
}

/// Open start times for one barber, taking their appointments into account.
///
/// A barber without a shift on `date` is reported as unavailable rather than
/// as an error.
#[axum::debug_handler]
pub async fn barber_availability(
    State(state): State<Arc<ApiState>>,
    Path((date, barber_id)): Path<(NaiveDate, i64)>,
    Query(query): Query<SlotQuery>,
    headers: HeaderMap,
) -> Result<Json<SlotsResponse>, AppError> {
    check_service_minutes(query.service_minutes)?;

    let availability = state.backend.availability_for_date(date).await?;
    let Some(entry) = availability.iter().find(|a| a.barber_id == barber_id) else {
        debug!(%date, barber_id, "Barber has no shift");
        return Ok(Json(SlotsResponse {
            barber_id,
            date,
            available: false,
            slots: Vec::new(),
        }));
    };
    let shift = usable_shift(entry);

    let bearer = bearer_from_headers(&headers).map(str::to_string);
    let appointments = state
        .backend
        .appointments_for_barber(barber_id, date, bearer)
        .await?;

    let slots = compute_available_slots(
        shift.as_ref(),
        &appointments,
        Some(&entry.available_slots),
        query.service_minutes,
        query.exclude_id,
    );

    Ok(Json(SlotsResponse {
        barber_id,
        date,
        available: !slots.is_empty(),
        slots,
    }))
}

/// Runs the calculator on caller-supplied inputs without touching the
/// backend.
#[axum::debug_handler]
pub async fn compute(
    Json(request): Json<ComputeRequest>,
) -> Result<Json<ComputeResponse>, AppError> {
    check_service_minutes(request.service_minutes)?;

    let shift = WorkShift::from_times(request.barber_id, &request.start_time, &request.end_time)?;
    let slots = compute_available_slots(
        Some(&shift),
        &request.appointments,
        request.candidate_slots.as_deref(),
        request.service_minutes,
        request.exclude_id,
    );

    Ok(Json(ComputeResponse {
        barber_id: request.barber_id,
        available: !slots.is_empty(),
        slots,
    }))
}
