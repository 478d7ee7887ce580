//! Auth gate: per-request admit/reject for the protected admin routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::auth::token::{self, TokenError, AUTH_COOKIE_NAME};
use crate::error::{AppError, AuthError};
use crate::routes::AppState;
use crate::store;

/// Resolved identity attached to admitted requests.
#[derive(Clone, Debug)]
pub struct AdminSession {
    pub id: i64,
    pub email: String,
    pub role: String,
}

/// Authentication middleware that validates the JWT cookie
///
/// Extracts the admin_token cookie, verifies the token, confirms the admin
/// still exists, and inserts an `AdminSession` extension. Rejects with 401 if:
/// - the cookie is missing
/// - the token is expired, tampered with, or malformed
/// - the admin the token refers to no longer exists
///
/// A store failure rejects with 500; it is logged and never retried here.
pub async fn auth_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar.get(AUTH_COOKIE_NAME).map(|cookie| cookie.value());
    let Some(token) = token else {
        tracing::warn!("Missing {} cookie", AUTH_COOKIE_NAME);
        return Err(AuthError::NoToken.into());
    };

    let claims = token::verify(&state.jwt, token).map_err(|e| {
        tracing::warn!(error = %e, "Rejected token");
        match e {
            TokenError::Expired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    })?;

    // Claims are server-issued; a non-numeric subject means the token was
    // forged with a valid signature-shaped payload.
    let admin_id: i64 = claims.sub.parse().map_err(|_| {
        tracing::warn!(sub = %claims.sub, "Token subject is not an admin id");
        AuthError::InvalidToken
    })?;

    // A valid token may outlive its account.
    let Some(admin) = store::find_by_id(&state.db_pool, admin_id).await? else {
        tracing::warn!(admin_id, "Token refers to a deleted admin");
        return Err(AuthError::IdentityGone.into());
    };

    req.extensions_mut().insert(AdminSession {
        id: admin.id,
        email: admin.email,
        role: admin.role,
    });

    Ok(next.run(req).await)
}
