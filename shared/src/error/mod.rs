//! Unified error system for the storefront workspace
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! "Not found" is normally *not* an error here: lookups return `Option` or an
//! empty `Vec`. `AppError` carries backend failures, configuration problems
//! and import failures.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 60xx-64xx: Catalog errors
//! - 65xx-69xx: Import errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::CategoryNotFound);
//! assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
//!
//! let err = AppError::missing_column("name").with_detail("file", "products.csv");
//! assert_eq!(err.code, ErrorCode::ImportColumnMissing);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
