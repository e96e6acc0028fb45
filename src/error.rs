//! Application error taxonomy and HTTP mapping.
//!
//! Form-level failures (blank fields, duplicate email, bad credentials)
//! are usually caught by handlers and re-rendered inline; anything that
//! escapes to the router is converted here into a plain status page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed form input.
    #[error("{message}")]
    Validation { message: String },

    /// A uniqueness constraint would be violated (duplicate email,
    /// referral code collision).
    #[error("{message}")]
    Conflict { message: String },

    /// Credentials did not match.
    #[error("{message}")]
    Unauthorized { message: String },

    /// The requested resource does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// Store or other infrastructure failure.
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => {
                tracing::error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict("Unique constraint violation");
            }
        }

        tracing::error!(error = %e, "database error");
        AppError::internal("Database error")
    }
}
