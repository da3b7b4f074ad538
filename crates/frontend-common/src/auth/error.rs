//! Authentication error taxonomy

use crate::config::ConfigError;
use crate::store::StoreError;
use ara_http::ClientError;
use thiserror::Error;

/// Errors surfaced by the session manager and the API wrapper.
///
/// Role mismatches are not errors; guards report them through
/// [`GuardOutcome`](super::GuardOutcome).
#[derive(Debug, Error)]
pub enum AuthError {
    /// Session storage or configuration could not be used
    #[error("Authentication service not available: {0}")]
    ServiceUnavailable(String),

    /// The login endpoint rejected the credentials; message is the server's
    #[error("{0}")]
    InvalidCredentials(String),

    /// A 2xx login response without access token, refresh token and user
    #[error("Invalid login response from server")]
    InvalidLoginResponse,

    /// An authenticated request was answered with 401
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// The refresh endpoint failed or was unreachable
    #[error("Token refresh failed: {0}")]
    RefreshFailure(String),

    /// Any other transport or server error
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::ServiceUnavailable(err.to_string())
    }
}

impl From<ConfigError> for AuthError {
    fn from(err: ConfigError) -> Self {
        Self::ServiceUnavailable(err.to_string())
    }
}

impl AuthError {
    /// Whether this error ended the session
    pub const fn ends_session(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::RefreshFailure(_))
    }
}
