//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 409 Conflict (client can retry)
            Self::ConcurrentModification => StatusCode::CONFLICT,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and directory rule violations)
            Self::ValidationFailed
            | Self::IdentifierNotSpecified
            | Self::IdentifierAlreadyExists
            | Self::EmployeeNotFound
            | Self::CompensationInPast => StatusCode::BAD_REQUEST,
        }
    }
}
