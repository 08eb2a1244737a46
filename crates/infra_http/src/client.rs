//! API client management
//!
//! This module provides client configuration and the request helpers shared
//! by every adapter. Each request carries the session's bearer token when a
//! session is active; a 401 or 403 response clears the session before the
//! error is returned.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use core_kernel::Session;

use crate::error::{ApiErrorBody, HttpError};

/// Configuration options for the API client
///
/// # Example
///
/// ```rust
/// use infra_http::HttpClientConfig;
/// use std::time::Duration;
///
/// let config = HttpClientConfig::new("http://localhost:8080/api")
///     .timeout(Duration::from_secs(10))
///     .user_agent("invoice-client/0.1");
/// assert_eq!(config.timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL every resource path is appended to
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl HttpClientConfig {
    /// Creates a configuration with the given base URL and default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("invoice-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Sets the request timeout (default: 30s)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/api")
    }
}

/// Shared HTTP client bound to one API and one session
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Builds a client from the configuration
    ///
    /// # Errors
    ///
    /// Returns `HttpError::ClientBuild` if the underlying client cannot be
    /// constructed
    pub fn new(config: HttpClientConfig, session: Session) -> Result<Self, HttpError> {
        info!(
            "Creating API client for {} with timeout={:?}",
            config.base_url, config.timeout
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| HttpError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let response = self.execute(self.client.get(self.url(path)), path).await?;
        decode(response).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let builder = self.client.get(self.url(path)).query(query);
        let response = self.execute(builder, path).await?;
        decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.client.post(self.url(path)).json(body);
        let response = self.execute(builder, path).await?;
        decode(response).await
    }

    /// POST without a request body, ignoring the response body
    pub async fn post_unit(&self, path: &str) -> Result<(), HttpError> {
        self.execute(self.client.post(self.url(path)), path).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.client.put(self.url(path)).json(body);
        let response = self.execute(builder, path).await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), HttpError> {
        self.execute(self.client.delete(self.url(path)), path).await?;
        Ok(())
    }

    async fn execute(&self, builder: RequestBuilder, path: &str) -> Result<Response, HttpError> {
        let builder = match self.session.bearer_token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            error!("Failed to send request to {}: {}", path, e);
            HttpError::transport(e)
        })?;

        let status = response.status();
        debug!(path, status = status.as_u16(), "Received response");
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let error = HttpError::Status {
            status: status.as_u16(),
            body: ApiErrorBody::parse(&raw),
        };

        if error.is_auth_failure() {
            warn!(path, status = status.as_u16(), "Credential rejected; clearing session");
            self.session.clear().await;
        } else if status.is_server_error() {
            error!(path, status = status.as_u16(), "Server error: {}", raw);
        }

        Err(error)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, HttpError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| HttpError::Decode(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| HttpError::Decode(e.to_string()))
}
