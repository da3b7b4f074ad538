//! Session and authentication manager for the ARA frontend
//!
//! [`SessionManager`] handles login, token refresh, role guards and logout.
//! [`ApiClient`] is the request wrapper pages use to call the backend.
//! Both run natively (on tokio) and in the browser (wasm32).

pub mod api;
pub mod auth;
pub mod config;
pub mod logging;
pub mod navigator;
pub mod runtime;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod components;

pub use api::ApiClient;
pub use auth::{AuthError, GuardOutcome, RefreshTimer, SessionManager};
pub use config::{AuthConfig, SessionConfig};
pub use navigator::Navigator;
pub use store::{MemorySessionStore, SessionStore, SessionVault, StoreError};

pub use ara_core::{Role, Routes, Session, UserId, UserRecord};
