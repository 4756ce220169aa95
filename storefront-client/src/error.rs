//! Client error types

use shared::StoreError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication rejected by the backend
    #[error("Authentication rejected: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend refused the request
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Missing or invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => StoreError::Timeout(e.to_string()),
            ClientError::Http(e) if e.is_decode() => StoreError::InvalidResponse(e.to_string()),
            ClientError::Http(e) => match e.status() {
                Some(status) => StoreError::Rejected {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => StoreError::Unavailable(e.to_string()),
            },
            ClientError::InvalidResponse(msg) => StoreError::InvalidResponse(msg),
            ClientError::Serialization(e) => StoreError::InvalidResponse(e.to_string()),
            ClientError::Unauthorized(message) => StoreError::Rejected {
                status: 401,
                message,
            },
            ClientError::NotFound(message) => StoreError::Rejected {
                status: 404,
                message,
            },
            ClientError::Rejected { status, message } => StoreError::Rejected { status, message },
            ClientError::Config(msg) => StoreError::Unavailable(msg),
        }
    }
}
