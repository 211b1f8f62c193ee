use axum::{
    body::to_bytes,
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use barbershop_api::middleware::{
    auth::bearer_from_headers,
    error_handling::{map_error, AppError},
};
use barbershop_core::errors::BookingError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[case(BookingError::NotFound("appointment 7".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("bad input".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::InvalidTime("25:00".into()), StatusCode::BAD_REQUEST)]
#[case(
    BookingError::DoesNotFit { start: "11:45".into(), duration: 30, shift_end: "12:00".into() },
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case(BookingError::Conflict("10:00".into()), StatusCode::CONFLICT)]
#[case(BookingError::Authentication("expired".into()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Upstream(eyre::eyre!("timeout")), StatusCode::BAD_GATEWAY)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::other("disk"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(BookingError::Conflict("10:00".into()));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Time 10:00 overlaps an existing appointment");
}

#[test]
fn test_eyre_report_becomes_upstream() {
    let error = AppError::from(eyre::eyre!("backend down"));

    assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
    assert!(matches!(error.0, BookingError::Upstream(_)));
}

#[rstest]
#[case(Some("Bearer abc.def.ghi"), Some("abc.def.ghi"))]
#[case(Some("Basic dXNlcg=="), None)]
#[case(None, None)]
fn test_bearer_from_headers(#[case] value: Option<&'static str>, #[case] expected: Option<&str>) {
    let mut headers = HeaderMap::new();
    if let Some(value) = value {
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
    }

    assert_eq!(bearer_from_headers(&headers), expected);
}
