//! Application error type and its JSON rendering.
//!
//! Every failure leaving an API handler is rendered as
//!
//! ```json
//! { "success": false, "error": "Authentication required" }
//! ```
//!
//! with the status code chosen by the variant. Internal details are logged,
//! never sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// Errors produced by services, repositories and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
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

    /// Error returned when a request carries no valid session.
    pub fn authentication_required() -> Self {
        Self::unauthorized("Authentication required")
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Collapses anything but auth and validation errors into a generic 500.
    ///
    /// The original error is logged under `operation` so the generic message
    /// stays actionable for operators.
    pub fn or_generic(self, operation: &str, message: &str) -> Self {
        match self {
            AppError::Unauthorized { .. } | AppError::Validation { .. } => self,
            other => {
                tracing::error!(error = %other, operation, "{message}");
                AppError::internal(message)
            }
        }
    }

    /// Like [`AppError::or_generic`], but lets `NotFound` through.
    pub fn hide_internal(self, operation: &str, message: &str) -> Self {
        match self {
            AppError::Internal { .. } => self.or_generic(operation, message),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::debug!(error = %e, "Database error");
        AppError::internal(format!("Database error: {e}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = e
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let reason = errors
                    .first()
                    .and_then(|err| err.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field}: {reason}")
            })
            .collect();

        AppError::bad_request(format!("Invalid request: {}", fields.join(", ")))
    }
}
