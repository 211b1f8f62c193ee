use serde::{Deserialize, Serialize};

use crate::{availability::WorkShift, errors::BookingResult, models::slot_list};

/// Per-barber working hours for one date, as returned by the backend's
/// availability query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarberAvailability {
    #[serde(rename = "barberoId", alias = "barberId")]
    pub barber_id: i64,
    #[serde(rename = "barberoNombre", default)]
    pub barber_name: String,
    #[serde(rename = "horaEntrada", alias = "startTime")]
    pub start_time: String,
    #[serde(rename = "horaSalida", alias = "endTime")]
    pub end_time: String,
    /// Authoritative candidate start times when non-empty.
    #[serde(
        rename = "horasDisponibles",
        alias = "availableSlots",
        default,
        deserialize_with = "slot_list"
    )]
    pub available_slots: Vec<String>,
    #[serde(rename = "horasOcupadas", default, deserialize_with = "slot_list")]
    pub occupied_slots: Vec<String>,
}

impl BarberAvailability {
    pub fn shift(&self) -> BookingResult<WorkShift> {
        WorkShift::from_times(self.barber_id, &self.start_time, &self.end_time)
    }

    /// A barber is offered to customers only when the backend lists at
    /// least one open start time.
    pub fn is_bookable(&self) -> bool {
        !self.available_slots.is_empty()
    }
}
