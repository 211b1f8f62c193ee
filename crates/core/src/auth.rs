//! # Authentication Gate
//!
//! Decides whether a bearer token grants access. The token is never
//! verified here (issuance and signatures belong to the backend); the gate
//! only checks that one is present and that its `exp` claim lies in the
//! future.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    credentials::CredentialProvider,
    errors::{BookingError, BookingResult},
    models::auth::{LoginResponse, User},
};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_BARBER: &str = "BARBERO";

/// JWT payload fields the client cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub rol: Option<String>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// The signed-in user, if the token names a role.
    pub fn user(&self) -> Option<User> {
        let role = self.rol.clone().filter(|r| !r.is_empty())?;
        Some(User {
            id: self.user_id.or(self.id),
            username: self.sub.clone().or_else(|| self.username.clone()),
            role,
        })
    }
}

/// Reads the claims from the payload segment of a JWT.
pub fn decode_claims(token: &str) -> BookingResult<Claims> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| BookingError::Authentication("Token has no payload".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| BookingError::Authentication(format!("Token payload is not base64: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| BookingError::Authentication(format!("Token payload is not valid: {e}")))
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty()).then_some(token)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Missing,
    Expired,
    Malformed,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Missing => "no session token",
            Self::Expired => "session token expired",
            Self::Malformed => "session token could not be read",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow(Claims),
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

/// Absent token, undecodable token, or `exp <= now` deny; anything else
/// allows.
pub fn evaluate(token: Option<&str>, now: DateTime<Utc>) -> AccessDecision {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return AccessDecision::Deny(DenyReason::Missing);
    };

    match decode_claims(token) {
        Ok(claims) if claims.is_expired(now) => AccessDecision::Deny(DenyReason::Expired),
        Ok(claims) => AccessDecision::Allow(claims),
        Err(e) => {
            warn!("Rejecting token: {}", e);
            AccessDecision::Deny(DenyReason::Malformed)
        }
    }
}

/// Client-side login state over an injected credential store.
#[derive(Debug)]
pub struct Session<P> {
    credentials: P,
}

impl<P: CredentialProvider> Session<P> {
    pub fn new(credentials: P) -> Self {
        Self { credentials }
    }

    /// Resumes a stored session, dropping the token if it already expired.
    pub fn restore(credentials: P, now: DateTime<Utc>) -> Self {
        let session = Self::new(credentials);
        if session.check(now) == AccessDecision::Deny(DenyReason::Expired) {
            info!("Stored session expired, clearing token");
            session.logout();
        }
        session
    }

    /// Stores the token from a successful login and returns the user.
    pub fn establish(&self, response: &LoginResponse) -> BookingResult<User> {
        let token = match (&response.token, response.success) {
            (Some(token), true) if !token.is_empty() => token,
            _ => {
                return Err(BookingError::Authentication(
                    response
                        .message
                        .clone()
                        .unwrap_or_else(|| "Login failed".to_string()),
                ));
            }
        };

        self.credentials.set(token);
        let user = User {
            id: response.user_id,
            username: response.username.clone(),
            role: response.rol.clone().unwrap_or_default(),
        };
        info!(username = ?user.username, role = %user.role, "User signed in");
        Ok(user)
    }

    pub fn check(&self, now: DateTime<Utc>) -> AccessDecision {
        evaluate(self.credentials.get().as_deref(), now)
    }

    pub fn current_user(&self, now: DateTime<Utc>) -> Option<User> {
        match self.check(now) {
            AccessDecision::Allow(claims) => claims.user(),
            AccessDecision::Deny(_) => None,
        }
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.credentials.get().map(|token| format!("Bearer {token}"))
    }

    pub fn logout(&self) {
        self.credentials.clear();
    }

    pub fn credentials(&self) -> &P {
        &self.credentials
    }
}
