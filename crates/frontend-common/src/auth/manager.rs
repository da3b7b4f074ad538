//! Session & auth manager
//!
//! Owns the session lifecycle: credential exchange, persistence, the
//! refresh timer and logout. It never renders anything; its only side
//! effects are storage writes and navigation through the [`Navigator`].

use super::error::AuthError;
use super::refresh::RefreshTimer;
use crate::config::SessionConfig;
use crate::navigator::Navigator;
use crate::runtime;
use crate::store::{SessionStore, SessionVault};
use ara_core::{Role, Routes, Session, UserRecord};
use ara_http::client::AraClient;
use ara_http::types::{LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest};
use ara_http::{ClientError, types::TokenResponse};
use std::ops::ControlFlow;
use std::sync::{Arc, Weak};

struct Inner {
    config: SessionConfig,
    routes: Routes,
    client: AraClient,
    vault: SessionVault,
    navigator: Arc<dyn Navigator>,
    refresh: RefreshTimer,
}

/// Handle to the session manager; clones share one session and one timer
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl PartialEq for SessionManager {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SessionManager {
    /// Create a manager over the given storage and navigation backends
    pub fn new(
        config: SessionConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, AuthError> {
        config.validate()?;

        let mut builder = AraClient::builder().base_url(config.api_base_url.as_str());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                routes: config.routes(),
                config,
                client,
                vault: SessionVault::new(store),
                navigator,
                refresh: RefreshTimer::new(),
            }),
        })
    }

    /// Manager backed by `localStorage` and `window.location`
    #[cfg(target_arch = "wasm32")]
    pub fn from_browser() -> Result<Self, AuthError> {
        Self::new(
            SessionConfig::from_location(),
            Arc::new(crate::store::BrowserSessionStore),
            Arc::new(crate::navigator::BrowserNavigator),
        )
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn routes(&self) -> &Routes {
        &self.inner.routes
    }

    pub fn vault(&self) -> &SessionVault {
        &self.inner.vault
    }

    pub(crate) fn navigator(&self) -> &dyn Navigator {
        self.inner.navigator.as_ref()
    }

    /// Client carrying the current access token, or anonymous when there is none
    pub fn authorized_client(&self) -> AraClient {
        let token = self.access_token();
        self.inner.client.with_access_token(token.as_deref())
    }

    /// Sign in with a username or email.
    ///
    /// On success the new session replaces any stored one and the refresh
    /// timer starts. Redirecting is left to the caller.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<Session, AuthError> {
        tracing::info!(identifier, "Attempting login");
        let request = LoginRequest {
            username: identifier.to_string(),
            password: password.to_string(),
        };

        let response = self.inner.client.login(&request).await.map_err(|err| {
            tracing::warn!(identifier, error = %err, "Login rejected");
            match err {
                ClientError::Serialization(_) => AuthError::InvalidLoginResponse,
                err if matches!(err.status(), Some(400 | 401 | 403)) => {
                    AuthError::InvalidCredentials(err.to_string())
                }
                err => AuthError::Client(err),
            }
        })?;

        self.establish(response)
    }

    /// Create a parent account and sign it in
    pub async fn register(&self, request: &RegisterRequest) -> Result<Session, AuthError> {
        tracing::info!(email = %request.email, "Registering account");
        let response = self
            .inner
            .client
            .register(request)
            .await
            .map_err(|err| match err {
                ClientError::Serialization(_) => AuthError::InvalidLoginResponse,
                err => AuthError::Client(err),
            })?;

        self.establish(response)
    }

    fn establish(&self, response: TokenResponse) -> Result<Session, AuthError> {
        let Some(session) = response.into_session() else {
            tracing::error!("Token response lacks access, refresh or user");
            return Err(AuthError::InvalidLoginResponse);
        };

        self.inner.vault.persist(&session)?;
        self.start_refresh_timer();

        tracing::info!(
            user = session.user.identifier(),
            role = %session.user.role,
            "Login successful"
        );
        Ok(session)
    }

    /// Restart the refresh timer for a session persisted by an earlier page.
    ///
    /// Returns whether a session was found.
    pub fn resume(&self) -> Result<bool, AuthError> {
        if self.inner.vault.load()?.is_none() {
            return Ok(false);
        }
        self.start_refresh_timer();
        Ok(true)
    }

    /// End the session.
    ///
    /// The refresh timer stops first, the server is told on a best-effort
    /// basis, then local storage is cleared and the page returns to the root.
    /// Every step runs whatever happened in the one before.
    pub async fn logout(&self) {
        self.inner.refresh.stop();

        if let Err(err) = self.notify_logout().await {
            tracing::warn!(error = %err, "Logout notification failed");
        }

        if let Err(err) = self.inner.vault.clear() {
            tracing::error!(error = %err, "Failed to clear session storage");
        }

        tracing::info!("Logged out");
        self.inner.navigator.redirect(&self.inner.routes.login());
    }

    async fn notify_logout(&self) -> Result<(), AuthError> {
        let Some(refresh) = self.inner.vault.refresh_token()? else {
            return Ok(());
        };
        let access = self.inner.vault.access_token()?;
        self.inner
            .client
            .with_access_token(access.as_deref())
            .logout(&LogoutRequest { refresh })
            .await?;
        Ok(())
    }

    /// Start (or restart) the periodic access token refresh
    pub fn start_refresh_timer(&self) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner
            .refresh
            .start(self.inner.config.refresh_interval(), move || {
                let manager = weak.upgrade().map(|inner| Self { inner });
                async move {
                    match manager {
                        Some(manager) => manager.refresh_tick().await,
                        None => ControlFlow::Break(()),
                    }
                }
            });
    }

    pub fn stop_refresh_timer(&self) {
        self.inner.refresh.stop();
    }

    pub fn is_refresh_timer_active(&self) -> bool {
        self.inner.refresh.is_active()
    }

    async fn refresh_tick(self) -> ControlFlow<()> {
        let result = self.refresh_access_token().await;
        match result {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => {
                tracing::warn!(error = %err, "Token refresh failed, ending session");
                runtime::spawn(async move { self.logout().await });
                ControlFlow::Break(())
            }
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Only the access token is rewritten. Any failure is a
    /// [`AuthError::RefreshFailure`].
    pub async fn refresh_access_token(&self) -> Result<(), AuthError> {
        let refresh = self
            .inner
            .vault
            .refresh_token()?
            .ok_or_else(|| AuthError::RefreshFailure("no refresh token stored".into()))?;

        let response = self
            .inner
            .client
            .refresh_token(
                &self.inner.config.refresh_path,
                &RefreshRequest {
                    refresh: refresh.clone(),
                },
            )
            .await
            .map_err(|err| AuthError::RefreshFailure(err.to_string()))?;

        if response.access.is_empty() {
            return Err(AuthError::RefreshFailure(
                "refresh response has no access token".into(),
            ));
        }

        if self.inner.vault.replace_access_token(&refresh, &response.access)? {
            tracing::debug!("Access token refreshed");
        } else {
            tracing::debug!("Session changed during refresh, discarding new token");
        }
        Ok(())
    }

    /// Stored session, if complete
    pub fn session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.inner.vault.load()?)
    }

    pub fn current_user(&self) -> Option<UserRecord> {
        self.inner.vault.current_user().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Cannot read current user");
            None
        })
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.vault.access_token().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Cannot read access token");
            None
        })
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.vault.refresh_token().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Cannot read refresh token");
            None
        })
    }

    /// Access token and user record are both stored
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some() && self.current_user().is_some()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.current_user().is_some_and(|user| &user.role == role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.current_user()
            .is_some_and(|user| roles.contains(&user.role))
    }

    /// Navigate to the dashboard for `role`
    pub fn redirect_to_dashboard(&self, role: &Role) {
        if !role.is_known() {
            tracing::warn!(role = %role, "Unrecognised role, using parent dashboard");
        }
        let target = self.inner.routes.dashboard(role);
        tracing::info!(role = %role, location = %target, "Redirecting to dashboard");
        self.inner.navigator.redirect(&target);
    }

    /// Send an already signed-in user from the login page to their dashboard.
    ///
    /// Returns whether a redirect happened.
    pub fn redirect_if_authenticated(&self) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        let Some(user) = self.current_user() else {
            return false;
        };
        tracing::info!(user = user.identifier(), role = %user.role, "Already authenticated");
        self.redirect_to_dashboard(&user.role);
        true
    }
}
