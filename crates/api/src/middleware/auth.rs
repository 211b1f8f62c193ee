//! # Authentication Middleware
//!
//! Guards routes behind the session gate: the request must carry an
//! `Authorization: Bearer <jwt>` header whose `exp` claim is still in the
//! future. The token is not verified here; the booking backend does that when
//! the request is forwarded.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use barbershop_core::{
    auth::{self, AccessDecision, Claims},
    errors::BookingError,
};
use chrono::Utc;
use tracing::debug;

use crate::middleware::error_handling::AppError;

/// The caller's bearer token, stored in request extensions by
/// [`require_session`] for handlers that forward it upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

/// Reads the bearer token from the `Authorization` header, if any.
pub fn bearer_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(auth::bearer_token)
}

/// Rejects requests without a live session with `401 Unauthorized`.
///
/// On success the decoded [`Claims`] and the [`SessionToken`] are added to
/// the request extensions.
pub async fn require_session(mut request: Request, next: Next) -> Result<Response, AppError> {
    let token = bearer_from_headers(request.headers()).map(str::to_string);

    let claims: Claims = match auth::evaluate(token.as_deref(), Utc::now()) {
        AccessDecision::Allow(claims) => claims,
        AccessDecision::Deny(reason) => {
            debug!(path = %request.uri().path(), %reason, "Request denied");
            return Err(AppError(BookingError::Authentication(reason.to_string())));
        }
    };

    let extensions = request.extensions_mut();
    extensions.insert(claims);
    if let Some(token) = token {
        extensions.insert(SessionToken(token));
    }

    Ok(next.run(request).await)
}
