//! Error type and its HTTP rendering

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use thiserror::Error;

/// Application error with a structured error code
///
/// Rendered to clients as a plain-text body carrying `message`, with the
/// status derived from `code`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message, safe to show to the caller
    pub message: String,
}

impl AppError {
    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();

        if matches!(self.code.category(), ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        } else {
            tracing::debug!(code = %self.code, message = %self.message, "Request rejected");
        }

        (status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "salary: salary_negative");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.to_string(), "salary: salary_negative");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::validation("bad").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::with_message(ErrorCode::DatabaseError, "down").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_status() {
        let response =
            AppError::with_message(ErrorCode::IdentifierAlreadyExists, "taken").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            AppError::with_message(ErrorCode::ConcurrentModification, "busy").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
