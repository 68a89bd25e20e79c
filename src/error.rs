//! Application errors and the JSON response envelope
//!
//! Every handler returns `Result<ApiResponse<T>, AppError>`. Store-level
//! failures (`sqlx::Error`) are converted at the operation boundary into
//! `DatabaseError`; the original message is kept for operator diagnosis
//! and surfaced only on 500 responses.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes, grouped by concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ==================== General ====================
    /// Missing or malformed input
    ValidationFailed,
    /// Referenced entity absent
    NotFound,
    /// Referenced category absent
    CategoryNotFound,
    /// Name collides with an existing row (case-sensitive exact match)
    DuplicateName,
    /// Destructive operation requires confirm=true
    ConfirmationRequired,

    // ==================== Auth ====================
    /// No session cookie presented
    NotAuthenticated,
    /// Unknown email, inactive account, or wrong password
    InvalidCredentials,
    /// Session absent or past its expiry
    SessionExpired,

    // ==================== Permission ====================
    /// Resolved user's role does not satisfy the requirement
    PermissionDenied,
    /// Deleting this user would leave no super_admin
    LastSuperAdminProtected,

    // ==================== System ====================
    /// Underlying persistence failure
    DatabaseError,
    /// Anything else
    InternalError,
}

impl ErrorCode {
    /// HTTP status this code maps to
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::ConfirmationRequired
            | ErrorCode::LastSuperAdminProtected => StatusCode::BAD_REQUEST,
            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::SessionExpired => StatusCode::UNAUTHORIZED,
            ErrorCode::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorCode::NotFound | ErrorCode::CategoryNotFound => StatusCode::NOT_FOUND,
            ErrorCode::DuplicateName => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Default human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::DuplicateName => "Name already exists",
            ErrorCode::ConfirmationRequired => "Confirmation required",
            // Deliberately non-specific: do not leak which factor failed
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::SessionExpired => "Session expired",
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::LastSuperAdminProtected => "The last super admin cannot be deleted",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

/// Application error carried through handlers via `?`
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Underlying store message, surfaced only on 500s
    pub detail: Option<String>,
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            detail: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{} not found", resource.into()))
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DuplicateName, msg)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn session_expired() -> Self {
        Self::new(ErrorCode::SessionExpired)
    }

    pub fn permission_denied() -> Self {
        Self::new(ErrorCode::PermissionDenied)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        Self {
            code: ErrorCode::DatabaseError,
            message: ErrorCode::DatabaseError.message().to_string(),
            detail: Some(e.to_string()),
        }
    }
}

/// Response envelope used by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Success with payload
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without payload, with an ack message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    /// Error envelope for an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.message.clone()),
            message: err.detail.clone(),
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

// ===== Axum integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();
        let body = ApiResponse::error(&self);
        (status, axum::Json(body)).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}
