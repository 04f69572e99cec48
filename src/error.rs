//! Error types for Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Registration attempted with an email that already has an account
    #[error("Email already registered")]
    DuplicateAccount,

    /// User or admin login with a bad email/username or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Direct-id lookup miss (terminal 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reservation attempted against an exhausted or missing book
    #[error("No available copies for reservation")]
    NoCopiesAvailable,

    /// Profile lookup miss
    #[error("User not found")]
    UserNotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Catalog store error: {0}")]
    Catalog(#[from] sqlx::Error),

    #[error("Account store error: {0}")]
    Accounts(#[from] mongodb::error::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::DuplicateAccount => {
                (StatusCode::CONFLICT, "duplicate_account", self.to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", self.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::NoCopiesAvailable => {
                (StatusCode::CONFLICT, "no_copies_available", self.to_string())
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found", self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation", msg.clone()),
            AppError::Session(msg) => (StatusCode::UNAUTHORIZED, "session", msg.clone()),
            AppError::Catalog(e) => {
                tracing::error!("Catalog store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "catalog_failure",
                    "Catalog store error".to_string(),
                )
            }
            AppError::Accounts(e) => {
                tracing::error!("Account store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "accounts_failure",
                    "Account store error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
