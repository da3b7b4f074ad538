//! Request and response bodies for the auth endpoints

use ara_core::{Session, UserRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Credentials for `POST /auth/login/`; `username` may also hold an email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Parent self-registration for `POST /auth/register/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Token triple returned by login and registration.
///
/// Every field is optional on the wire; [`TokenResponse::into_session`]
/// decides whether the response is complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

impl TokenResponse {
    /// Build a session when access token, refresh token and user are all present
    pub fn into_session(self) -> Option<Session> {
        let access_token = self.access.filter(|token| !token.is_empty())?;
        let refresh_token = self.refresh.filter(|token| !token.is_empty())?;
        let user = self.user?;
        Some(Session {
            access_token,
            refresh_token,
            user,
        })
    }
}

/// Body for the token refresh endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Body for `POST /auth/logout/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh: String,
}

/// Error payload shape used by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<JsonValue>,
    #[serde(default)]
    pub error: Option<JsonValue>,
}

impl ErrorBody {
    /// Extract the server-provided message from a raw response body
    pub fn message_from(body: &str) -> Option<String> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        parsed
            .detail
            .or(parsed.error)
            .and_then(|value| match value {
                JsonValue::String(text) => Some(text),
                JsonValue::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|text| !text.is_empty())
    }
}
