//! Token codec: signed, time-limited admin credentials and their cookie.

use std::time::{SystemTime, UNIX_EPOCH};

use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JwtConfig;

/// Name of the HTTP-only cookie carrying the admin token.
pub const AUTH_COOKIE_NAME: &str = "admin_token";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Admin id
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Issued at (UTC timestamp, seconds)
    pub iat: u64,
    /// Expiration time (UTC timestamp, seconds)
    pub exp: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("malformed token")]
    Malformed,

    #[error("failed to encode token: {0}")]
    Encode(String),

    #[error("system clock before unix epoch")]
    Clock,
}

fn unix_now() -> Result<u64, TokenError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| TokenError::Clock)
}

/// Issue a signed token for an admin. HS256 over the configured secret.
pub fn issue(config: &JwtConfig, admin_id: i64, email: &str, role: &str) -> Result<String, TokenError> {
    let now = unix_now()?;

    let claims = Claims {
        sub: admin_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        iat: now,
        exp: now + config.lifetime_seconds,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encode(e.to_string()))
}

/// Verify a token and return its claims.
///
/// Expiry is checked before anything else a caller could act on; a token
/// past its `exp` fails with `Expired` even when the signature is valid.
pub fn verify(config: &JwtConfig, token: &str) -> Result<Claims, TokenError> {
    // No clock leeway: a token one second past `exp` is expired.
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    Ok(token_data.claims)
}

/// Build the session cookie for a freshly issued token.
pub fn build_auth_cookie<'a>(
    config: &JwtConfig,
    secure: bool,
    admin_id: i64,
    email: &str,
    role: &str,
) -> Result<Cookie<'a>, TokenError> {
    let token = issue(config, admin_id, email, role)?;

    Ok(Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::seconds(config.lifetime_seconds as i64))
        .build())
}

/// Cookie value handed to `CookieJar::remove` so the removal cookie matches
/// the attributes the auth cookie was set with.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(AUTH_COOKIE_NAME);
    cookie.set_path("/");
    cookie
}
