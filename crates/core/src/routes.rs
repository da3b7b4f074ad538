//! Role → dashboard routing
//!
//! Pages live under an optional base path. When the app is served from the
//! repository sub-path (`/ara-frontend1/...`) every route is prefixed with
//! [`APP_BASE_PATH`]; otherwise routes are rooted at `/`.

use crate::types::Role;

/// Path segment that marks a sub-path deployment
pub const REPO_SEGMENT: &str = "/ara-frontend1";

/// Base path used for sub-path deployments
pub const APP_BASE_PATH: &str = "/ara-frontend1/AppAra";

pub const ADMIN_DASHBOARD: &str = "html/admin-dashboard.html";
pub const TEACHER_DASHBOARD: &str = "html/teacher-dashboard.html";
pub const PARENT_DASHBOARD: &str = "html/parent-dashboard.html";
pub const SPECIALIST_DASHBOARD: &str = "html/specialist-dashboard.html";

/// Dashboard page for a role, relative to the base path.
///
/// Unknown roles land on the parent dashboard.
pub const fn dashboard_page(role: &Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_DASHBOARD,
        Role::Teacher => TEACHER_DASHBOARD,
        Role::Specialist => SPECIALIST_DASHBOARD,
        Role::Parent | Role::Unknown(_) => PARENT_DASHBOARD,
    }
}

/// Absolute navigation targets for the current deployment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Routes {
    base_path: String,
}

impl Routes {
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path = base_path.into().trim_end_matches('/').to_string();
        Self { base_path }
    }

    /// Pick the base path from the current page path
    pub fn detect(pathname: &str) -> Self {
        if pathname.contains(REPO_SEGMENT) {
            Self::new(APP_BASE_PATH)
        } else {
            Self::default()
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Application root, which is also the login entry point
    pub fn login(&self) -> String {
        format!("{}/", self.base_path)
    }

    pub fn dashboard(&self, role: &Role) -> String {
        format!("{}/{}", self.base_path, dashboard_page(role))
    }
}
