//! Application error type and its HTTP mapping.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::store::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Why a submission was rejected as invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputKind {
    /// Body or expiry could not be decoded.
    Malformed,
    /// Expiry is not strictly in the future.
    Expired,
    /// Decoded fine but failed field validation.
    Rejected,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput {
        kind: InvalidInputKind,
        message: String,
        details: Value,
    },
    #[error("{message}")]
    RateLimited { message: String, details: Value },
    #[error("{message}")]
    Storage { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
}

impl AppError {
    pub fn malformed_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            kind: InvalidInputKind::Malformed,
            message: message.into(),
            details,
        }
    }
    pub fn expired_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            kind: InvalidInputKind::Expired,
            message: message.into(),
            details,
        }
    }
    pub fn rejected_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            kind: InvalidInputKind::Rejected,
            message: message.into(),
            details,
        }
    }
    pub fn rate_limited(message: impl Into<String>, details: Value) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
        }
    }
    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
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

    /// HTTP status for this error.
    ///
    /// Malformed input maps to 500 to stay wire-compatible with existing clients
    /// of `POST /api/v1/urls`; a past expiry maps to 400.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { kind, .. } => match kind {
                InvalidInputKind::Malformed => StatusCode::INTERNAL_SERVER_ERROR,
                InvalidInputKind::Expired | InvalidInputKind::Rejected => StatusCode::BAD_REQUEST,
            },
            AppError::RateLimited { .. } => StatusCode::UNAUTHORIZED,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { kind, .. } => match kind {
                InvalidInputKind::Malformed => "malformed_input",
                InvalidInputKind::Expired => "expired_input",
                InvalidInputKind::Rejected => "validation_error",
            },
            AppError::RateLimited { .. } => "rate_limited",
            AppError::Storage { .. } => "storage_error",
            AppError::NotFound { .. } => "not_found",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::InvalidInput {
                message, details, ..
            }
            | AppError::RateLimited { message, details }
            | AppError::Storage { message, details }
            | AppError::NotFound { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// Backend failures become an opaque storage error; the cause is logged here
/// and never reaches the response body.
impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Key-value store failure");
        AppError::storage("Storage backend unavailable", json!({}))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::malformed_input(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_default();
        AppError::rejected_input("Validation failed", details)
    }
}
