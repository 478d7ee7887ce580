//! GET /admin/dashboard (behind the auth gate).

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::middleware::AdminSession;
use crate::routes::admin::session::SessionAdmin;
use crate::routes::AppState;
use crate::store::{self, DashboardStats};

#[derive(Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub message: String,
    pub data: DashboardData,
}

#[derive(Serialize)]
pub struct DashboardData {
    pub admin: SessionAdmin,
    pub stats: DashboardStats,
    pub timestamp: String,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<Json<DashboardResponse>, AppError> {
    let stats = store::dashboard_stats(&state.db_pool).await?;

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(DashboardResponse {
        success: true,
        message: "Dashboard data retrieved successfully".to_string(),
        data: DashboardData {
            admin: session.into(),
            stats,
            timestamp,
        },
    }))
}
