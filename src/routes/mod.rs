pub mod admin;

use axum::{
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sqlx::SqlitePool;

use crate::config::JwtConfig;
use crate::error::ApiMessage;
use crate::middleware::auth_gate;

pub use admin::{get_dashboard, get_profile, post_login, post_logout};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt: JwtConfig,
    pub secure_cookies: bool,
}

/// Assemble the full router: public login + probes, and the protected admin
/// surface behind the auth gate.
pub fn app_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/admin/logout", post(post_logout))
        .route("/admin/profile", get(get_profile))
        .route("/admin/dashboard", get(get_dashboard))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_gate,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/admin/login", post(post_login))
        .merge(protected)
        .with_state(state)
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(ApiMessage::ok("ok"))
}

/// GET /ready - Readiness probe (database reachability)
pub async fn ready(State(state): State<AppState>) -> Response {
    match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
    {
        Ok(_) => Json(ApiMessage::ok("ready")).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiMessage::fail("database unavailable")),
            )
                .into_response()
        }
    }
}
