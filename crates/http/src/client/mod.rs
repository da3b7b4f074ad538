//! ARA HTTP client

pub mod auth;
pub mod endpoints;
pub mod error;

use error::ClientError;
use reqwest::{Client, ClientBuilder, header};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the ARA backend API.
///
/// Cloning is cheap; the underlying connection pool is shared. A clone with
/// a different bearer token is made with [`AraClient::with_access_token`].
#[derive(Clone)]
pub struct AraClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl AraClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> AraClientBuilder {
        AraClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token attached to every request, if any
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Same client with a different (or no) bearer token
    pub fn with_access_token(&self, token: Option<&str>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            access_token: token.map(ToString::to_string),
        }
    }

    /// Create a request builder, with authentication when a token is set
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = &self.access_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    /// Execute a request and handle common errors.
    ///
    /// An empty success body decodes as JSON `null`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        self.execute_with_fallback(request, None).await
    }

    /// Like [`AraClient::execute`], with an endpoint-specific message for
    /// error responses that carry none
    pub async fn execute_with_fallback<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        fallback: Option<&str>,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "Request succeeded");
            let body = if body.trim().is_empty() { "null" } else { &body };
            Ok(serde_json::from_str(body)?)
        } else {
            tracing::debug!(status = status.as_u16(), "Request failed");
            Err(ClientError::from_response_body(status, &body, fallback))
        }
    }
}

/// Builder for AraClient
#[derive(Default)]
pub struct AraClientBuilder {
    base_url: Option<String>,
    access_token: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AraClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token for authentication
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the request timeout (ignored on wasm32)
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AraClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let agent = self
                .user_agent
                .unwrap_or_else(|| concat!("ara-client/", env!("CARGO_PKG_VERSION")).to_string());
            client_builder = client_builder.user_agent(agent);
        }

        #[cfg(target_arch = "wasm32")]
        let _ = (self.timeout, self.user_agent); // Browsers own these

        let client = client_builder.build()?;

        Ok(AraClient {
            client,
            base_url,
            access_token: self.access_token,
        })
    }
}
