use axum::http::{header, HeaderValue, StatusCode};
use barbershop_backend::mock::MockBackend;
use barbershop_core::models::appointment::Appointment;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_log::test;

use crate::test_utils::{appointment, availability, date, server, token_expiring_in, LUIS};

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

/// Barber 3 works 09:00-12:00 with appointment 1 at 10:00 and 2 at 11:00.
fn backend_with_day(token: &str) -> MockBackend {
    let token = token.to_string();
    let mut backend = MockBackend::new();
    backend
        .expect_appointments_for_barber()
        .with(eq(LUIS), eq(date()), eq(Some(token)))
        .returning(|_, _, _| Ok(vec![appointment(1, "10:00", 30), appointment(2, "11:00", 30)]));
    backend
        .expect_availability_for_date()
        .returning(|_| Ok(vec![availability(LUIS, "09:00", "12:00", &[])]));
    backend
}

#[test(tokio::test)]
async fn test_reschedule_forwards_to_backend() {
    let token = token_expiring_in(3600);
    let mut backend = backend_with_day(&token);
    let expected_token = token.clone();
    backend
        .expect_reschedule_appointment()
        .withf(move |id, time, bearer| *id == 1 && time == "10:30" && bearer == expected_token)
        .times(1)
        .returning(|id, time, _| Ok(appointment(id, time, 30)));
    let server = server(backend);

    let response = server
        .put("/api/appointments/1/time")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "barberId": 3, "date": "2025-03-14", "time": "10:30 AM" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Appointment>().start_time, "10:30");
}

#[test(tokio::test)]
async fn test_reschedule_into_overlap_is_conflict() {
    let token = token_expiring_in(3600);
    let mut backend = backend_with_day(&token);
    backend.expect_reschedule_appointment().never();
    let server = server(backend);

    let response = server
        .put("/api/appointments/1/time")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "barberId": 3, "date": "2025-03-14", "time": "10:45" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[test(tokio::test)]
async fn test_reschedule_past_shift_end_does_not_fit() {
    let token = token_expiring_in(3600);
    let mut backend = backend_with_day(&token);
    backend.expect_reschedule_appointment().never();
    let server = server(backend);

    let response = server
        .put("/api/appointments/1/time")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "barberId": 3, "date": "2025-03-14", "time": "11:45" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test(tokio::test)]
async fn test_reschedule_to_same_time_is_rejected() {
    let token = token_expiring_in(3600);
    let mut backend = MockBackend::new();
    backend
        .expect_appointments_for_barber()
        .returning(|_, _, _| Ok(vec![appointment(1, "10:00", 30)]));
    let server = server(backend);

    let response = server
        .put("/api/appointments/1/time")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "barberId": 3, "date": "2025-03-14", "time": "10:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_reschedule_unknown_appointment() {
    let token = token_expiring_in(3600);
    let mut backend = MockBackend::new();
    backend
        .expect_appointments_for_barber()
        .returning(|_, _, _| Ok(Vec::new()));
    let server = server(backend);

    let response = server
        .put("/api/appointments/99/time")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "barberId": 3, "date": "2025-03-14", "time": "10:00" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test(tokio::test)]
async fn test_reschedule_with_malformed_time() {
    let token = token_expiring_in(3600);
    let server = server(MockBackend::new());

    let response = server
        .put("/api/appointments/1/time")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "barberId": 3, "date": "2025-03-14", "time": "25:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_reschedule_requires_session() {
    let mut backend = MockBackend::new();
    backend.expect_appointments_for_barber().never();
    let server = server(backend);

    let response = server
        .put("/api/appointments/1/time")
        .json(&json!({ "barberId": 3, "date": "2025-03-14", "time": "10:30" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"],
        "Authentication error: no session token"
    );
}

#[test(tokio::test)]
async fn test_reschedule_with_expired_session() {
    let server = server(MockBackend::new());

    let response = server
        .put("/api/appointments/1/time")
        .add_header(header::AUTHORIZATION, bearer(&token_expiring_in(-60)))
        .json(&json!({ "barberId": 3, "date": "2025-03-14", "time": "10:30" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"],
        "Authentication error: session token expired"
    );
}
