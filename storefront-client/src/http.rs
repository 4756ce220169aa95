//! HTTP client for the backend's table and storage APIs

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Query string pairs
pub type Query<'a> = [(&'a str, String)];

/// HTTP client for making requests to the hosted backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Backend base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach `apikey` and bearer headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.token.as_deref().unwrap_or(&self.api_key);
        request
            .header("apikey", &self.api_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", bearer))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    ///
    /// `prefer` is forwarded as the `Prefer` header (upsert resolution,
    /// representation return).
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Query<'_>,
        body: &B,
        prefer: Option<&str>,
    ) -> ClientResult<T> {
        let mut request = self.authorize(self.client.post(self.url(path)).query(query).json(body));
        if let Some(prefer) = prefer {
            request = request.header("Prefer", prefer);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request whose response body is ignored
    pub async fn post_no_content<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        let request = self
            .authorize(self.client.post(self.url(path)).json(body))
            .header("Prefer", "return=minimal");
        let response = request.send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        tracing::debug!(status = status.as_u16(), body = %text, "Backend request failed");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            _ => Err(ClientError::Rejected {
                status: status.as_u16(),
                message: text,
            }),
        }
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}
