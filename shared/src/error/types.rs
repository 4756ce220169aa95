//! Error types

use super::codes::ErrorCode;
use crate::store::StoreError;
use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the workspace, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (row numbers, column names, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }

    /// Create an invalid taxonomy error
    pub fn taxonomy(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TaxonomyInvalid, msg)
    }

    /// Create an import parse error
    pub fn import_parse(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ImportParseFailed, msg)
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        let c = column.into();
        Self::with_message(
            ErrorCode::ImportColumnMissing,
            format!("Import file is missing the '{}' column", c),
        )
        .with_detail("column", c)
    }

    /// Whether the caller may retry the operation later
    pub fn is_transient(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::UpstreamUnavailable | ErrorCode::NetworkError | ErrorCode::TimeoutError
        )
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => {
                Self::with_message(ErrorCode::UpstreamUnavailable, msg)
            }
            StoreError::Timeout(msg) => Self::with_message(ErrorCode::TimeoutError, msg),
            StoreError::Rejected { status, message } => {
                Self::with_message(ErrorCode::UpstreamRejected, message)
                    .with_detail("status", status)
            }
            StoreError::InvalidResponse(msg) => {
                Self::with_message(ErrorCode::UpstreamInvalidResponse, msg)
            }
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Row is unusable")
            .with_detail("row", 12)
            .with_detail("reason", "missing name");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("row").unwrap(), 12);
        assert_eq!(details.get("reason").unwrap(), "missing name");
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::not_found("Subcategory");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Subcategory not found");
        assert!(err.details.as_ref().unwrap().contains_key("resource"));

        let err = AppError::missing_column("name");
        assert_eq!(err.code, ErrorCode::ImportColumnMissing);
        assert_eq!(err.http_status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = AppError::config("TAXONOMY_CONFIG_PATH unreadable");
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_from_store_error() {
        let err: AppError = StoreError::Unavailable("connection refused".into()).into();
        assert_eq!(err.code, ErrorCode::UpstreamUnavailable);
        assert!(err.is_transient());
        assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);

        let err: AppError = StoreError::Rejected {
            status: 400,
            message: "bad filter".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::UpstreamRejected);
        assert!(!err.is_transient());
        assert_eq!(err.details.unwrap().get("status").unwrap(), 400);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::CategoryNotFound, "No category 'office'");
        assert_eq!(format!("{}", err), "No category 'office'");
    }
}
