use std::sync::Arc;

use axum_test::TestServer;
use barbershop_api::{app, ApiState};
use barbershop_backend::mock::MockBackend;
use barbershop_core::models::{
    appointment::{Appointment, AppointmentStatus},
    availability::BarberAvailability,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;

pub const LUIS: i64 = 3;

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

/// Serves the full router over the given mock.
pub fn server(backend: MockBackend) -> TestServer {
    let state = Arc::new(ApiState::new(Arc::new(backend)));
    TestServer::new(app(state)).expect("Failed to start test server")
}

pub fn availability(barber_id: i64, start: &str, end: &str, slots: &[&str]) -> BarberAvailability {
    BarberAvailability {
        barber_id,
        barber_name: format!("Barbero {barber_id}"),
        start_time: start.to_string(),
        end_time: end.to_string(),
        available_slots: slots.iter().map(|s| s.to_string()).collect(),
        occupied_slots: Vec::new(),
    }
}

pub fn appointment(id: i64, start: &str, minutes: u32) -> Appointment {
    Appointment {
        id,
        date: date(),
        start_time: start.to_string(),
        barber_id: LUIS,
        barber_name: "Luis".to_string(),
        service_id: 1,
        service_name: "Corte".to_string(),
        duration_minutes: minutes,
        service_price: 50.0,
        client_name: "Ana".to_string(),
        client_email: "ana@example.com".to_string(),
        client_phone: None,
        comments: None,
        status: AppointmentStatus::Confirmed,
    }
}

/// An unsigned JWT whose `exp` is `seconds` from now.
pub fn token_expiring_in(seconds: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = json!({
        "exp": (Utc::now() + Duration::seconds(seconds)).timestamp(),
        "sub": "luis",
        "rol": "BARBERO",
    });
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}
