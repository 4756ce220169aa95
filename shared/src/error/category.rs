//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 6000-6499: Catalog errors
/// - 6500-6999: Import errors
/// - everything else: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Catalog errors (60xx-64xx)
    Catalog,
    /// Import errors (65xx-69xx)
    Import,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            6000..6500 => Self::Catalog,
            6500..7000 => Self::Import,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Catalog => "catalog",
            Self::Import => "import",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(7), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);

        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Catalog);
        assert_eq!(ErrorCategory::from_code(6499), ErrorCategory::Catalog);
        assert_eq!(ErrorCategory::from_code(6500), ErrorCategory::Import);
        assert_eq!(ErrorCategory::from_code(6999), ErrorCategory::Import);

        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(
            ErrorCode::CategoryNotFound.category(),
            ErrorCategory::Catalog
        );
        assert_eq!(ErrorCode::TaxonomyInvalid.category(), ErrorCategory::Catalog);
        assert_eq!(ErrorCode::ImportEmpty.category(), ErrorCategory::Import);
        assert_eq!(
            ErrorCode::UpstreamUnavailable.category(),
            ErrorCategory::System
        );
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Catalog).unwrap();
        assert_eq!(json, "\"catalog\"");

        let category: ErrorCategory = serde_json::from_str("\"import\"").unwrap();
        assert_eq!(category, ErrorCategory::Import);
        assert_eq!(category.name(), "import");
    }
}
