use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Response envelope shared by every non-2xx (and most 2xx) JSON bodies.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Authentication failures surfaced to HTTP callers.
///
/// Every variant maps to 401. The messages are part of the API contract:
/// wrong password and unknown email produce the same response to avoid
/// account enumeration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Access denied. No token provided.")]
    NoToken,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("Token expired.")]
    TokenExpired,

    #[error("Invalid token. Admin not found.")]
    IdentityGone,

    #[error("Invalid email or password")]
    InvalidCredentials,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal server error")]
    Internal(String),
}

impl From<crate::auth::token::TokenError> for AppError {
    fn from(err: crate::auth::token::TokenError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Auth(err) => (StatusCode::UNAUTHORIZED, err.to_string()),
            AppError::Database(err) => {
                tracing::error!(error = ?err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiMessage::fail(message))).into_response()
    }
}
