//! POST /admin/login

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::password::verify_password;
use crate::auth::token::build_auth_cookie;
use crate::error::{AppError, AuthError};
use crate::routes::AppState;
use crate::store;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub admin: LoginAdmin,
}

/// Public projection of the admin row returned on login. Never carries the
/// password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAdmin {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

/// Handle login submission
///
/// Unknown email and wrong password produce byte-identical failures so the
/// response shape cannot be used for account enumeration.
pub async fn post_login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    // A missing or unparseable body gets the same envelope as missing
    // fields, not axum's plain-text rejection.
    let Json(body) = payload.map_err(|_| {
        AppError::Validation("Email and password are required".to_string())
    })?;

    if body.email.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let admin = match store::find_by_email(&state.db_pool, &body.email).await? {
        Some(admin) => admin,
        None => {
            warn!(email = %body.email, "Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let password_ok = verify_password(&body.password, &admin.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !password_ok {
        warn!(admin_id = admin.id, "Login attempt with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let cookie = build_auth_cookie(
        &state.jwt,
        state.secure_cookies,
        admin.id,
        &admin.email,
        &admin.role,
    )?;
    let jar = jar.add(cookie);

    info!(admin_id = admin.id, "Admin logged in");

    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            admin: LoginAdmin {
                id: admin.id,
                email: admin.email,
                role: admin.role,
                created_at: admin.created_at,
            },
        }),
    ))
}
