//! Yew bindings for the session manager

pub mod require_role;

pub use require_role::{RequireRole, SessionProvider, use_session};
