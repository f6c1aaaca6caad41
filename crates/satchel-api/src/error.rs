//! API errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use satchel_core::DomainError;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            _ if err.is_policy_violation() => ApiError::BadRequest(err.to_string()),
            DomainError::InvalidCredentials
            | DomainError::SessionNotFound
            | DomainError::SessionExpired => ApiError::Unauthorized(err.to_string()),
            DomainError::UserNotFound => ApiError::NotFound(err.to_string()),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Server-side failures are logged in full and answered generically
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
            match self {
                ApiError::Unauthorized(msg)
                | ApiError::Forbidden(msg)
                | ApiError::NotFound(msg)
                | ApiError::BadRequest(msg)
                | ApiError::DatabaseError(msg)
                | ApiError::InternalError(msg) => msg,
            }
        };

        (status, Json(ApiResponse::error(code, message))).into_response()
    }
}
