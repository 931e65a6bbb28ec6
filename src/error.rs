//! Application error type and its HTTP representation.
//!
//! Every client-facing failure is an [`AppError`] variant carrying a
//! human-readable message and structured JSON details. Handlers return
//! `Result<_, AppError>` and axum renders the error through [`IntoResponse`].
//!
//! # Response Format
//!
//! ```json
//! {
//!   "error": {
//!     "code": "not_found",
//!     "message": "Short link not found",
//!     "details": { "code": "abc123" }
//!   }
//! }
//! ```
//!
//! # Status Mapping
//!
//! | Variant           | Status | Code               |
//! |-------------------|--------|--------------------|
//! | `InvalidInput`    | 400    | `invalid_input`    |
//! | `Unauthenticated` | 401    | `unauthenticated`  |
//! | `NotFound`        | 404    | `not_found`        |
//! | `CodeConflict`    | 409    | `code_conflict`    |
//! | `Store`           | 500    | `store_error`      |
//! | `Generation`      | 500    | `generation_error` |

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed destination URL or custom code.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    /// Missing or invalid caller identity.
    #[error("{message}")]
    Unauthenticated { message: String, details: Value },

    /// Unknown short code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Short code already taken.
    #[error("{message}")]
    CodeConflict { message: String, details: Value },

    /// Persistence failure.
    #[error("{message}")]
    Store { message: String, details: Value },

    /// Random source or uniqueness check failed while generating a code.
    #[error("{message}")]
    Generation { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }
    pub fn unauthenticated(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthenticated {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::CodeConflict {
            message: message.into(),
            details,
        }
    }
    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }
    pub fn generation(message: impl Into<String>, details: Value) -> Self {
        Self::Generation {
            message: message.into(),
            details,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            AppError::InvalidInput { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_input", message, details)
            }
            AppError::Unauthenticated { message, details } => (
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::CodeConflict { message, details } => {
                (StatusCode::CONFLICT, "code_conflict", message, details)
            }
            AppError::Store { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                message,
                details,
            ),
            AppError::Generation { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "generation_error",
                message,
                details,
            ),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        AppError::invalid_input("Validation failed", json!({ "fields": fields }))
    }
}

/// Maps a database error onto the application error kinds.
///
/// Unique-constraint violations become [`AppError::CodeConflict`] with a
/// message naming the duplicated value; everything else is a
/// [`AppError::Store`] failure.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        let constraint = db.constraint();
        return AppError::conflict(
            conflict_message(constraint),
            json!({ "constraint": constraint }),
        );
    }

    tracing::error!(error = %e, "Database error");
    AppError::store("Database error", json!({}))
}

/// User-facing message for a violated unique constraint.
pub fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("idx_links_code_lower") => "Short code already exists",
        Some("users_username_key") => "Username already exists",
        Some("users_email_key") => "Email already exists",
        Some("api_tokens_token_hash_key") => "Token already exists",
        _ => "Unique constraint violation",
    }
}
