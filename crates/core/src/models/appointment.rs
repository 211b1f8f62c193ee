use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an appointment as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "PENDIENTE", alias = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMADA", alias = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "CANCELADA", alias = "CANCELLED")]
    Cancelled,
    #[serde(rename = "COMPLETADA", alias = "COMPLETED")]
    Completed,
    #[serde(rename = "UNKNOWN", other)]
    Unknown,
}

impl AppointmentStatus {
    /// Whether an appointment in this state still blocks the barber's time.
    pub fn occupies(self) -> bool {
        !matches!(self, Self::Cancelled | Self::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(rename = "fecha", alias = "date")]
    pub date: NaiveDate,
    #[serde(rename = "hora", alias = "startTime")]
    pub start_time: String,
    #[serde(rename = "barberoId", alias = "barberId")]
    pub barber_id: i64,
    #[serde(rename = "barberoNombre", default)]
    pub barber_name: String,
    #[serde(rename = "tipoCorteId", default)]
    pub service_id: i64,
    #[serde(rename = "tipoCorteNombre", default)]
    pub service_name: String,
    #[serde(rename = "tipoCorteTiempoMinutos", alias = "durationMinutes")]
    pub duration_minutes: u32,
    #[serde(rename = "tipoCortePrecio", default)]
    pub service_price: f64,
    #[serde(rename = "nombreCliente", default)]
    pub client_name: String,
    #[serde(rename = "correoCliente", default)]
    pub client_email: String,
    #[serde(rename = "telefonoCliente", default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(rename = "comentarios", default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(rename = "estado", alias = "status")]
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "hora")]
    pub start_time: String,
    #[serde(rename = "barberoId")]
    pub barber_id: i64,
    #[serde(rename = "tipoCorteId")]
    pub service_id: i64,
    #[serde(rename = "nombreCliente")]
    pub client_name: String,
    #[serde(rename = "correoCliente")]
    pub client_email: String,
    #[serde(rename = "telefonoCliente", skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(rename = "comentarios", skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(rename = "correosConfirmacion")]
    pub confirmation_emails: Vec<String>,
}

/// Body of a reschedule request: the new 24h start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescheduleRequest {
    #[serde(rename = "hora", alias = "time")]
    pub time: String,
}
