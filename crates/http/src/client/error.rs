//! Client error types

use crate::types::ErrorBody;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("{message}")]
    ServerError { status: u16, message: String },

    /// 401: the bearer token was missing, invalid or expired
    #[error("{0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Bad request
    #[error("{0}")]
    BadRequest(String),

    /// Forbidden
    #[error("{0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Classify a non-success response, taking the message from the body.
    ///
    /// Without a usable `detail`/`error` field the message is `fallback`,
    /// or `HTTP Error: <code>` when no fallback is given.
    pub fn from_response_body(
        status: reqwest::StatusCode,
        body: &str,
        fallback: Option<&str>,
    ) -> Self {
        let message = ErrorBody::message_from(body).unwrap_or_else(|| {
            fallback.map_or_else(
                || format!("HTTP Error: {}", status.as_u16()),
                ToString::to_string,
            )
        });
        Self::from_status(status, message)
    }

    /// HTTP status code, when the server answered
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::AuthenticationFailed(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            Self::Request(_) | Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    /// Whether the server rejected the credentials (HTTP 401)
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// Whether the error came from the transport rather than the server
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}
