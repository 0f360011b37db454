//! Unified error codes for the catalog workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (hierarchy, services, overrides, stock)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 60xx: Hierarchy ====================
    BrandNotFound = 6001,
    CategoryNotFound = 6002,
    SeriesNotFound = 6003,
    ProductNotFound = 6004,
    /// A child references a parent that does not exist
    BrokenParentReference = 6010,
    InvalidLevel = 6011,

    // ==================== 61xx: Services ====================
    ServiceNotFound = 6101,
    /// A service is scoped to an entity that does not exist
    ServiceTargetMissing = 6102,
    OverrideNotFound = 6103,

    // ==================== 62xx: Stock ====================
    StockTypeNotFound = 6201,
    VariantNotFound = 6202,
    InvalidPrice = 6203,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this code represents success
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Hierarchy
            ErrorCode::BrandNotFound => "Brand not found",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::SeriesNotFound => "Series not found",
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::BrokenParentReference => "Parent reference does not resolve",
            ErrorCode::InvalidLevel => "Invalid catalog level",

            // Services
            ErrorCode::ServiceNotFound => "Service not found",
            ErrorCode::ServiceTargetMissing => "Service is attached to a missing entity",
            ErrorCode::OverrideNotFound => "Service override not found",

            // Stock
            ErrorCode::StockTypeNotFound => "Stock type not found",
            ErrorCode::VariantNotFound => "Stock variant not found",
            ErrorCode::InvalidPrice => "Price must not be negative",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
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
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Hierarchy
            6001 => Ok(ErrorCode::BrandNotFound),
            6002 => Ok(ErrorCode::CategoryNotFound),
            6003 => Ok(ErrorCode::SeriesNotFound),
            6004 => Ok(ErrorCode::ProductNotFound),
            6010 => Ok(ErrorCode::BrokenParentReference),
            6011 => Ok(ErrorCode::InvalidLevel),

            // Services
            6101 => Ok(ErrorCode::ServiceNotFound),
            6102 => Ok(ErrorCode::ServiceTargetMissing),
            6103 => Ok(ErrorCode::OverrideNotFound),

            // Stock
            6201 => Ok(ErrorCode::StockTypeNotFound),
            6202 => Ok(ErrorCode::VariantNotFound),
            6203 => Ok(ErrorCode::InvalidPrice),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::BrandNotFound.code(), 6001);
        assert_eq!(ErrorCode::ProductNotFound.code(), 6004);
        assert_eq!(ErrorCode::BrokenParentReference.code(), 6010);
        assert_eq!(ErrorCode::ServiceNotFound.code(), 6101);
        assert_eq!(ErrorCode::StockTypeNotFound.code(), 6201);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::ProductNotFound.is_success());
    }

    #[test]
    fn test_try_from() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(6003), Ok(ErrorCode::SeriesNotFound));
        assert_eq!(ErrorCode::try_from(6103), Ok(ErrorCode::OverrideNotFound));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(6005), Err(InvalidErrorCode(6005)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::ProductNotFound).unwrap();
        assert_eq!(json, "6004");

        let code: ErrorCode = serde_json::from_str("6202").unwrap();
        assert_eq!(code, ErrorCode::VariantNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::CategoryNotFound), "6002");
        assert_eq!(ErrorCode::CategoryNotFound.message(), "Category not found");
        assert_eq!(
            format!("{}", InvalidErrorCode(42)),
            "invalid error code: 42"
        );
    }
}
