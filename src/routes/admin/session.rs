//! POST /admin/logout and GET /admin/profile (both behind the auth gate).

use axum::{Extension, Json};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use tracing::info;

use crate::auth::token::removal_cookie;
use crate::error::ApiMessage;
use crate::middleware::AdminSession;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub admin: SessionAdmin,
}

#[derive(Serialize)]
pub struct SessionAdmin {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl From<AdminSession> for SessionAdmin {
    fn from(session: AdminSession) -> Self {
        Self {
            id: session.id,
            email: session.email,
            role: session.role,
        }
    }
}

/// Clear the session cookie.
///
/// The token itself stays valid until its natural expiry; a stateless codec
/// has nothing server-side to revoke.
pub async fn post_logout(
    Extension(session): Extension<AdminSession>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiMessage>) {
    let jar = jar.remove(removal_cookie());

    info!(admin_id = session.id, "Admin logged out");

    (jar, Json(ApiMessage::ok("Logout successful")))
}

/// Return the identity the auth gate resolved for this request. The client
/// treats this endpoint as the single source of truth for "am I logged in".
pub async fn get_profile(Extension(session): Extension<AdminSession>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        success: true,
        message: "Profile retrieved successfully".to_string(),
        admin: session.into(),
    })
}
