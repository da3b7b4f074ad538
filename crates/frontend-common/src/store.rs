//! Session persistence
//!
//! [`SessionStore`] is the narrow key/value seam over browser storage;
//! [`SessionVault`] is the typed view the auth manager works through. The
//! vault writes the three session keys together or not at all.

use crate::config::AuthConfig;
use ara_core::{Session, UserRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Storage backend errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write {key}: {message}")]
    Write { key: String, message: String },

    #[error("Stored session is corrupt: {0}")]
    Corrupt(String),
}

/// Persistent string key/value storage
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-process store, for native hosts and tests
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

#[cfg(target_arch = "wasm32")]
impl BrowserSessionStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window object".into()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                message: format!("{e:?}"),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                message: format!("{e:?}"),
            })
    }
}

/// Typed session access over a [`SessionStore`]
#[derive(Clone)]
pub struct SessionVault {
    store: Arc<dyn SessionStore>,
}

impl SessionVault {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Write all three session keys, replacing any previous session.
    ///
    /// If any write fails the keys are removed again, so no partial session
    /// is left behind.
    pub fn persist(&self, session: &Session) -> Result<(), StoreError> {
        let user = serde_json::to_string(&session.user)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let result = self
            .store
            .set(AuthConfig::ACCESS_TOKEN_KEY, &session.access_token)
            .and_then(|()| {
                self.store
                    .set(AuthConfig::REFRESH_TOKEN_KEY, &session.refresh_token)
            })
            .and_then(|()| self.store.set(AuthConfig::USER_KEY, &user));

        if let Err(err) = result {
            tracing::error!(error = %err, "Session write failed, rolling back");
            if let Err(rollback) = self.clear() {
                tracing::error!(error = %rollback, "Rollback failed, session keys may remain");
            }
            return Err(err);
        }
        Ok(())
    }

    /// Read the stored session; a partial session reads as none
    pub fn load(&self) -> Result<Option<Session>, StoreError> {
        let Some(access_token) = self.access_token()? else {
            return Ok(None);
        };
        let Some(refresh_token) = self.refresh_token()? else {
            return Ok(None);
        };
        let Some(user) = self.current_user()? else {
            return Ok(None);
        };
        Ok(Some(Session {
            access_token,
            refresh_token,
            user,
        }))
    }

    pub fn access_token(&self) -> Result<Option<String>, StoreError> {
        self.non_empty(AuthConfig::ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        self.non_empty(AuthConfig::REFRESH_TOKEN_KEY)
    }

    pub fn current_user(&self) -> Result<Option<UserRecord>, StoreError> {
        self.non_empty(AuthConfig::USER_KEY)?
            .map(|raw| serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string())))
            .transpose()
    }

    /// Swap in a fresh access token, leaving refresh token and user untouched.
    ///
    /// Nothing is written unless the stored refresh token is still
    /// `issued_for`; returns whether the token was replaced.
    pub fn replace_access_token(
        &self,
        issued_for: &str,
        access_token: &str,
    ) -> Result<bool, StoreError> {
        if self.refresh_token()?.as_deref() != Some(issued_for) {
            return Ok(false);
        }
        self.store.set(AuthConfig::ACCESS_TOKEN_KEY, access_token)?;
        Ok(true)
    }

    /// Remove every session key. All keys are attempted; the first error is returned.
    pub fn clear(&self) -> Result<(), StoreError> {
        AuthConfig::SESSION_KEYS
            .iter()
            .map(|key| self.store.remove(key))
            .fold(Ok(()), |acc, result| acc.and(result))
    }

    fn non_empty(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(key)?.filter(|value| !value.is_empty()))
    }
}
