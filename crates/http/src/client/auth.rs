//! Authentication endpoints

use super::{AraClient, endpoints, error::ClientError};
use crate::types::{
    LoginRequest, LogoutRequest, RefreshRequest, RefreshResponse, RegisterRequest, TokenResponse,
};
use reqwest::Method;
use serde_json::Value as JsonValue;

impl AraClient {
    /// Exchange credentials for a token triple.
    ///
    /// Error responses without a message read `Login failed`.
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(Method::POST, endpoints::AUTH_LOGIN)
            .json(request);
        self.execute_with_fallback(req, Some("Login failed")).await
    }

    /// Create a parent account; the backend signs the new user in
    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(Method::POST, endpoints::AUTH_REGISTER)
            .json(request);
        self.execute_with_fallback(req, Some("Failed to create account"))
            .await
    }

    /// Revoke a refresh token. The response body is ignored.
    pub async fn logout(&self, request: &LogoutRequest) -> Result<(), ClientError> {
        let req = self
            .request(Method::POST, endpoints::AUTH_LOGOUT)
            .json(request);
        self.execute::<JsonValue>(req).await.map(drop)
    }

    /// Mint a new access token from a refresh token
    pub async fn refresh_token(
        &self,
        path: &str,
        request: &RefreshRequest,
    ) -> Result<RefreshResponse, ClientError> {
        let req = self.request(Method::POST, path).json(request);
        self.execute(req).await
    }
}
