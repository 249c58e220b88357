use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::availability::ValidationFailure;
use crate::db::DatabaseError;
use crate::i18n::I18n;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    /// A validation failure already rendered in the caller's language.
    #[error("Validation error: {failure}")]
    LocalizedValidation {
        failure: ValidationFailure,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Attach the caller's language to a validation failure.
    pub fn localized(self, i18n: &I18n) -> Self {
        match self {
            AppError::Validation(failure) => AppError::LocalizedValidation {
                message: i18n.get(failure.message_key()),
                failure,
            },
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthenticated => return StatusCode::UNAUTHORIZED.into_response(),
            AppError::MethodNotAllowed => return StatusCode::METHOD_NOT_ALLOWED.into_response(),
            AppError::Validation(ref failure) => {
                return validation_response(failure, &failure.to_string())
            }
            AppError::LocalizedValidation {
                ref failure,
                ref message,
            } => return validation_response(failure, message),
            AppError::Database(ref err) => match err {
                DatabaseError::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
                DatabaseError::Duplicate => (StatusCode::CONFLICT, "Resource already exists"),
                _ => {
                    error!(error = %err, "Database failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal server error occurred",
                    )
                }
            },
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found"),
            AppError::InternalServerError(ref details) => {
                error!(%details, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                )
            }
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "details": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

fn validation_response(failure: &ValidationFailure, message: &str) -> Response {
    warn!(code = failure.message_key(), %failure, "Rejected availability update");

    let body = Json(json!({
        "error": {
            "code": failure.message_key(),
            "message": message,
            "details": failure.to_string(),
        }
    }));

    (StatusCode::BAD_REQUEST, body).into_response()
}

pub type AppResult<T> = Result<T, AppError>;
