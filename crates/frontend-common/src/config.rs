//! Frontend configuration

use ara_core::Routes;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Storage key for the access token
    pub const ACCESS_TOKEN_KEY: &'static str = "ara_jwt_access";

    /// Storage key for the refresh token
    pub const REFRESH_TOKEN_KEY: &'static str = "ara_jwt_refresh";

    /// Storage key for the serialized user record
    pub const USER_KEY: &'static str = "ara_current_user";

    /// Every key a session occupies; written and cleared together
    pub const SESSION_KEYS: [&'static str; 3] =
        [Self::ACCESS_TOKEN_KEY, Self::REFRESH_TOKEN_KEY, Self::USER_KEY];

    /// Access tokens live 30 minutes; refresh one minute early
    pub const TOKEN_REFRESH_INTERVAL_MS: u64 = 29 * 60 * 1000;

    pub const DEVELOPMENT_API_BASE_URL: &'static str = "http://127.0.0.1:8000/api";
    pub const PRODUCTION_API_BASE_URL: &'static str =
        "https://ara-test1-ca0b96725df3.herokuapp.com/api";
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Runtime settings for the session manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// API root every endpoint path is appended to
    pub api_base_url: String,

    /// Prefix for page navigation targets (empty for root deployments)
    pub base_path: String,

    /// Period of the access-token refresh timer
    pub refresh_interval_ms: u64,

    /// Token refresh endpoint, relative to `api_base_url`
    pub refresh_path: String,

    /// Request timeout in seconds (native targets only)
    pub request_timeout_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: AuthConfig::DEVELOPMENT_API_BASE_URL.to_string(),
            base_path: String::new(),
            refresh_interval_ms: AuthConfig::TOKEN_REFRESH_INTERVAL_MS,
            refresh_path: ara_http::client::endpoints::TOKEN_REFRESH.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl SessionConfig {
    /// Local hosts talk to the development API, everything else to production
    pub fn for_hostname(hostname: &str) -> Self {
        let api_base_url = if matches!(hostname, "localhost" | "127.0.0.1") {
            AuthConfig::DEVELOPMENT_API_BASE_URL
        } else {
            AuthConfig::PRODUCTION_API_BASE_URL
        };
        Self {
            api_base_url: api_base_url.to_string(),
            ..Self::default()
        }
    }

    /// Resolve settings from the current page location
    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> Self {
        let location = web_sys::window().map(|window| window.location());
        let hostname = location
            .as_ref()
            .and_then(|location| location.hostname().ok())
            .unwrap_or_default();
        let pathname = location
            .as_ref()
            .and_then(|location| location.pathname().ok())
            .unwrap_or_default();

        Self {
            base_path: Routes::detect(&pathname).base_path().to_string(),
            ..Self::for_hostname(&hostname)
        }
    }

    /// Load defaults, then an optional TOML/YAML file, then `ARA_*` environment variables
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(config::Environment::with_prefix("ARA").try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn routes(&self) -> Routes {
        Routes::new(self.base_path.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be empty".into()));
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_ms must be greater than zero".into(),
            ));
        }
        if !self.refresh_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "refresh_path must start with '/': {}",
                self.refresh_path
            )));
        }
        Ok(())
    }
}
