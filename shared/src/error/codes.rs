//! Unified error codes for the storefront workspace
//!
//! This module defines all error codes used by the taxonomy engine, the import
//! pipeline and the backend client. Error codes are organized by category:
//! - 0xxx: General errors
//! - 60xx-64xx: Catalog errors (categories, subcategories, products, taxonomy)
//! - 65xx-69xx: Import errors
//! - 9xxx: System errors (configuration, upstream backend)

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
    /// Required field missing
    RequiredField = 7,

    // ==================== 6xxx: Catalog ====================
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Category not found
    CategoryNotFound = 6101,
    /// Canonical taxonomy configuration is invalid
    TaxonomyInvalid = 6201,
    /// Shared subcategory declaration is invalid
    SharedSubcategoryInvalid = 6202,

    // ==================== 65xx: Import ====================
    /// Import row could not be used
    ImportRowInvalid = 6501,
    /// Import file is missing a required column
    ImportColumnMissing = 6502,
    /// Import file could not be parsed
    ImportParseFailed = 6503,
    /// Import file has no rows
    ImportEmpty = 6504,
    /// No stored image matched an imported product
    ImportImageMissing = 6505,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Upstream backend unavailable
    UpstreamUnavailable = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Upstream backend rejected the request
    UpstreamRejected = 9006,
    /// Upstream backend returned an unreadable response
    UpstreamInvalidResponse = 9007,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",

            // Catalog
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::TaxonomyInvalid => "Canonical taxonomy is invalid",
            ErrorCode::SharedSubcategoryInvalid => "Shared subcategory declaration is invalid",

            // Import
            ErrorCode::ImportRowInvalid => "Import row is invalid",
            ErrorCode::ImportColumnMissing => "Import file is missing a required column",
            ErrorCode::ImportParseFailed => "Import file could not be parsed",
            ErrorCode::ImportEmpty => "Import file has no rows",
            ErrorCode::ImportImageMissing => "No stored image matched the product",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::UpstreamUnavailable => "Catalog backend is unavailable",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::UpstreamRejected => "Catalog backend rejected the request",
            ErrorCode::UpstreamInvalidResponse => "Catalog backend returned an invalid response",
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
            7 => Ok(ErrorCode::RequiredField),

            // Catalog
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6201 => Ok(ErrorCode::TaxonomyInvalid),
            6202 => Ok(ErrorCode::SharedSubcategoryInvalid),

            // Import
            6501 => Ok(ErrorCode::ImportRowInvalid),
            6502 => Ok(ErrorCode::ImportColumnMissing),
            6503 => Ok(ErrorCode::ImportParseFailed),
            6504 => Ok(ErrorCode::ImportEmpty),
            6505 => Ok(ErrorCode::ImportImageMissing),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::UpstreamUnavailable),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::UpstreamRejected),
            9007 => Ok(ErrorCode::UpstreamInvalidResponse),

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
    fn test_code_roundtrip_through_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::NotFound,
            ErrorCode::CategoryNotFound,
            ErrorCode::ProductInvalidPrice,
            ErrorCode::ImportColumnMissing,
            ErrorCode::ImportImageMissing,
            ErrorCode::UpstreamUnavailable,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(
            InvalidErrorCode(4242).to_string(),
            "invalid error code: 4242"
        );
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::ImportRowInvalid).unwrap();
        assert_eq!(json, "6501");

        let code: ErrorCode = serde_json::from_str("9002").unwrap();
        assert_eq!(code, ErrorCode::UpstreamUnavailable);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }
}
