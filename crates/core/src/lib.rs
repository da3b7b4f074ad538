//! ARA core types shared by the HTTP client and the frontend session manager

pub mod routes;
pub mod types;

pub use routes::{Routes, dashboard_page};
pub use types::{Role, Session, UserId, UserRecord};
