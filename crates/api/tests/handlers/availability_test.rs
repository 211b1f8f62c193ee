use axum::http::{header, HeaderValue, StatusCode};
use barbershop_api::handlers::availability::{BarberSlots, ComputeResponse, SlotsResponse};
use barbershop_backend::mock::MockBackend;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use test_log::test;

use crate::test_utils::{appointment, availability, date, server, LUIS};

fn labels(slots: &[barbershop_core::availability::SlotLabel]) -> Vec<String> {
    slots.iter().map(ToString::to_string).collect()
}

#[test(tokio::test)]
async fn test_list_availability_only_bookable_barbers() {
    let mut backend = MockBackend::new();
    backend
        .expect_availability_for_date()
        .with(eq(date()))
        .times(1)
        .returning(|_| {
            Ok(vec![
                availability(LUIS, "09:00", "12:00", &["10:00", "09:00", "nope"]),
                availability(4, "09:00", "12:00", &[]),
                availability(5, "bad", "12:00", &["09:00"]),
            ])
        });
    let server = server(backend);

    let response = server.get("/api/availability/2025-03-14").await;

    response.assert_status_ok();
    let barbers = response.json::<Vec<BarberSlots>>();
    assert_eq!(barbers.len(), 1);
    assert_eq!(barbers[0].barber_id, LUIS);
    assert_eq!(labels(&barbers[0].slots), vec!["09:00 AM", "10:00 AM"]);
}

#[test(tokio::test)]
async fn test_barber_availability_excludes_occupied_slots() {
    let mut backend = MockBackend::new();
    backend
        .expect_availability_for_date()
        .returning(|_| Ok(vec![availability(LUIS, "09:00", "17:00", &[])]));
    backend
        .expect_appointments_for_barber()
        .with(eq(LUIS), eq(date()), eq(None))
        .returning(|_, _, _| Ok(vec![appointment(1, "10:00", 30)]));
    let server = server(backend);

    let response = server.get("/api/availability/2025-03-14/3").await;

    response.assert_status_ok();
    let body = response.json::<SlotsResponse>();
    let slots = labels(&body.slots);
    assert!(body.available);
    assert_eq!(body.date, date());
    assert_eq!(slots.len(), 8 * 12 - 6);
    assert!(!slots.contains(&"10:00 AM".to_string()));
    assert!(slots.contains(&"09:55 AM".to_string()));
    assert!(slots.contains(&"10:30 AM".to_string()));
}

#[test(tokio::test)]
async fn test_barber_availability_with_service_and_exclusion() {
    let mut backend = MockBackend::new();
    backend
        .expect_availability_for_date()
        .returning(|_| Ok(vec![availability(LUIS, "09:00", "10:00", &[])]));
    backend
        .expect_appointments_for_barber()
        .with(eq(LUIS), eq(date()), eq(Some("abc".to_string())))
        .returning(|_, _, _| Ok(vec![appointment(1, "09:00", 30)]));
    let server = server(backend);

    let response = server
        .get("/api/availability/2025-03-14/3")
        .add_query_param("serviceMinutes", 45)
        .add_query_param("excludeId", 1)
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"))
        .await;

    response.assert_status_ok();
    let body = response.json::<SlotsResponse>();
    assert_eq!(
        labels(&body.slots),
        vec!["09:00 AM", "09:05 AM", "09:10 AM", "09:15 AM"]
    );
}

#[test(tokio::test)]
async fn test_barber_without_shift_is_unavailable() {
    let mut backend = MockBackend::new();
    backend
        .expect_availability_for_date()
        .returning(|_| Ok(vec![availability(4, "09:00", "17:00", &["09:00"])]));
    backend.expect_appointments_for_barber().never();
    let server = server(backend);

    let response = server.get("/api/availability/2025-03-14/3").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "barberId": 3, "date": "2025-03-14", "available": false, "slots": [] })
    );
}

#[rstest]
#[case(0)]
#[case(1441)]
#[case(u32::MAX)]
#[tokio::test]
async fn test_out_of_range_service_minutes_is_rejected(#[case] minutes: u32) {
    let server = server(MockBackend::new());

    let response = server
        .get("/api/availability/2025-03-14/3")
        .add_query_param("serviceMinutes", minutes)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_compute_rejects_oversized_service() {
    let server = server(MockBackend::new());

    let response = server
        .post("/api/availability/compute")
        .json(&json!({
            "barberId": 3,
            "startTime": "09:00",
            "endTime": "17:00",
            "serviceMinutes": u32::MAX
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_compute_with_oversized_appointment() {
    let server = server(MockBackend::new());

    let response = server
        .post("/api/availability/compute")
        .json(&json!({
            "barberId": 3,
            "startTime": "09:00",
            "endTime": "09:30",
            "appointments": [
                { "id": 1, "fecha": "2025-03-14", "hora": "09:15", "barberoId": 3,
                  "tipoCorteTiempoMinutos": u32::MAX, "estado": "CONFIRMADA" }
            ]
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<ComputeResponse>();
    assert_eq!(labels(&body.slots), vec!["09:00 AM", "09:05 AM", "09:10 AM"]);
}

#[test(tokio::test)]
async fn test_backend_failure_is_bad_gateway() {
    let mut backend = MockBackend::new();
    backend
        .expect_availability_for_date()
        .returning(|_| Err(eyre::eyre!("connection refused")));
    let server = server(backend);

    let response = server.get("/api/availability/2025-03-14").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Upstream error: connection refused");
}

#[test(tokio::test)]
async fn test_compute_from_request_body() {
    let server = server(MockBackend::new());

    let response = server
        .post("/api/availability/compute")
        .json(&json!({
            "barberId": 3,
            "startTime": "00:00",
            "endTime": "09:30",
            "candidateSlots": ["09:00", "09:05"],
            "serviceMinutes": 60
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<ComputeResponse>();
    assert!(!body.available);
    assert!(body.slots.is_empty());
}

#[test(tokio::test)]
async fn test_compute_back_to_back() {
    let server = server(MockBackend::new());

    let response = server
        .post("/api/availability/compute")
        .json(&json!({
            "barberId": 3,
            "startTime": "09:00",
            "endTime": "10:30",
            "appointments": [
                { "id": 1, "fecha": "2025-03-14", "hora": "09:00", "barberoId": 3,
                  "tipoCorteTiempoMinutos": 30, "estado": "CONFIRMADA" },
                { "id": 2, "fecha": "2025-03-14", "hora": "09:30", "barberoId": 3,
                  "tipoCorteTiempoMinutos": 30, "estado": "PENDIENTE" }
            ]
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<ComputeResponse>();
    assert_eq!(
        labels(&body.slots),
        vec!["10:00 AM", "10:05 AM", "10:10 AM", "10:15 AM", "10:20 AM", "10:25 AM"]
    );
}

#[test(tokio::test)]
async fn test_compute_rejects_bad_shift() {
    let server = server(MockBackend::new());

    let response = server
        .post("/api/availability/compute")
        .json(&json!({ "barberId": 3, "startTime": "9am", "endTime": "17:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid time: 9am");
}
