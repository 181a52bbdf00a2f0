// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Global Application Error Enum.
/// Every service returns it; route handlers decide whether it becomes a
/// flash message or a JSON payload.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 409 Conflict
    #[error("Username already exists")]
    DuplicateUsername,

    // 409 Conflict
    #[error("Email is already in use")]
    DuplicateEmail,

    // 401 Unauthorized
    #[error("Invalid username or password")]
    InvalidCredentials,

    // 400 Bad Request
    #[error("{0}")]
    Validation(String),

    // 401 Unauthorized
    #[error("Authentication required")]
    Unauthenticated,

    // 500 Internal Server Error (constraint violation or connectivity)
    #[error("Database error: {0}")]
    Persistence(String),

    // 500 Internal Server Error (hashing, token signing)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateUsername | AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts the error into the `{success: false, error}` JSON payload.
/// Server-side failures are logged and replaced with a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::Persistence(msg) | AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Allows using `?` on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(first_message(&errors))
    }
}

/// Picks the first human-readable message out of a validation report.
fn first_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{}'", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}
