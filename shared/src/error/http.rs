//! HTTP status code mapping for error codes
//!
//! The storefront pages render a standard "not found" page for unresolved
//! routes and an error page when the catalog backend is down; this mapping is
//! what they use to pick the status.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::CategoryNotFound => StatusCode::NOT_FOUND,

            // 422 Unprocessable (file parsed but unusable)
            Self::ImportRowInvalid | Self::ImportColumnMissing | Self::ImportEmpty => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 503 Service Unavailable (transient errors, client can retry)
            Self::UpstreamUnavailable | Self::NetworkError | Self::TimeoutError => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            // 502 Bad Gateway (backend answered, but not usefully)
            Self::UpstreamRejected | Self::UpstreamInvalidResponse => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            Self::InternalError
            | Self::ConfigError
            | Self::TaxonomyInvalid
            | Self::SharedSubcategoryInvalid => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::CategoryNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_upstream_status() {
        assert_eq!(
            ErrorCode::UpstreamUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::TimeoutError.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::UpstreamRejected.http_status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_import_status() {
        assert_eq!(
            ErrorCode::ImportColumnMissing.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::ImportParseFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_status() {
        assert_eq!(
            ErrorCode::ConfigError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::TaxonomyInvalid.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
