//! Unified error codes for the employee directory
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 8xxx: Employee directory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 8xxx: Employee directory ====================
    /// Blank identifier where one is required
    IdentifierNotSpecified = 8001,
    /// Identifier already taken
    IdentifierAlreadyExists = 8002,
    /// Referenced employee does not exist
    EmployeeNotFound = 8003,
    /// Compensation not strictly after the latest entry
    CompensationInPast = 8004,
    /// Record changed between read and write
    ConcurrentModification = 8005,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),

            8001 => Ok(ErrorCode::IdentifierNotSpecified),
            8002 => Ok(ErrorCode::IdentifierAlreadyExists),
            8003 => Ok(ErrorCode::EmployeeNotFound),
            8004 => Ok(ErrorCode::CompensationInPast),
            8005 => Ok(ErrorCode::ConcurrentModification),

            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::IdentifierNotSpecified.code(), 8001);
        assert_eq!(ErrorCode::CompensationInPast.code(), 8004);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::EmployeeNotFound).unwrap();
        assert_eq!(json, "8003");
        let code: ErrorCode = serde_json::from_str("8002").unwrap();
        assert_eq!(code, ErrorCode::IdentifierAlreadyExists);
        assert!(serde_json::from_str::<ErrorCode>("7777").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::EmployeeNotFound.to_string(), "E8003");
    }

    #[test]
    fn test_roundtrip_all_codes() {
        let all = [
            ErrorCode::ValidationFailed,
            ErrorCode::IdentifierNotSpecified,
            ErrorCode::IdentifierAlreadyExists,
            ErrorCode::EmployeeNotFound,
            ErrorCode::CompensationInPast,
            ErrorCode::ConcurrentModification,
            ErrorCode::DatabaseError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
