//! Authentication module

pub mod error;
pub mod guard;
pub mod manager;
pub mod refresh;

// Re-export commonly used items
pub use error::AuthError;
pub use guard::GuardOutcome;
pub use manager::SessionManager;
pub use refresh::RefreshTimer;
