//! Client configuration

use crate::{ClientError, ClientResult};

/// Storage bucket used when none is configured
pub const DEFAULT_BUCKET: &str = "product-images";

/// Client configuration for connecting to the hosted backend
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | BACKEND_URL | (required) | Backend base URL |
/// | BACKEND_API_KEY | (required) | Project API key |
/// | STORAGE_BUCKET | product-images | Bucket holding product images |
/// | REQUEST_TIMEOUT_SECS | 30 | Per-request timeout |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://project.example.co")
    pub base_url: String,

    /// Project API key, sent as `apikey` and as the default bearer token
    pub api_key: String,

    /// Bearer token overriding the API key (service role or user session)
    pub token: Option<String>,

    /// Storage bucket holding product images
    pub bucket: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            token: None,
            bucket: DEFAULT_BUCKET.to_string(),
            timeout: 30,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var("BACKEND_URL")
            .map_err(|_| ClientError::Config("BACKEND_URL is not set".to_string()))?;
        let api_key = std::env::var("BACKEND_API_KEY")
            .map_err(|_| ClientError::Config("BACKEND_API_KEY is not set".to_string()))?;

        let mut config = Self::new(base_url, api_key);
        if let Ok(bucket) = std::env::var("STORAGE_BUCKET")
            && !bucket.trim().is_empty()
        {
            config.bucket = bucket;
        }
        config.timeout = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the storage bucket
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<super::HttpClient> {
        super::HttpClient::new(self)
    }

    /// Create a catalog backend from this configuration
    pub fn build_catalog(&self) -> ClientResult<super::HttpCatalog> {
        super::HttpCatalog::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://localhost:54321", "anon")
            .with_bucket("media")
            .with_token("service")
            .with_timeout(5);
        assert_eq!(config.bucket, "media");
        assert_eq!(config.token.as_deref(), Some("service"));
        assert_eq!(config.timeout, 5);
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://localhost:54321", "anon");
        assert_eq!(config.bucket, DEFAULT_BUCKET);
        assert_eq!(config.timeout, 30);
        assert!(config.token.is_none());
    }
}
