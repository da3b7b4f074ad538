//! Backend endpoint paths, relative to the API base URL

pub const AUTH_LOGIN: &str = "/auth/login/";
pub const AUTH_REGISTER: &str = "/auth/register/";
pub const AUTH_LOGOUT: &str = "/auth/logout/";
pub const TOKEN_REFRESH: &str = "/token/refresh/";
/// Refresh path used by deployments that nest it under `/auth`
pub const AUTH_TOKEN_REFRESH: &str = "/auth/token/refresh/";

/// Resource collections consumed through the generic request wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Children,
    Assessments,
    AssessmentRequests,
    ParentInputs,
    ParentAssessmentRequests,
    Specialists,
    Progress,
    Iep,
    Users,
}

impl Resource {
    /// Collection path, e.g. `/children/`
    pub const fn path(self) -> &'static str {
        match self {
            Self::Children => "/children/",
            Self::Assessments => "/assessments/",
            Self::AssessmentRequests => "/assessment-requests/",
            Self::ParentInputs => "/parent-inputs/",
            Self::ParentAssessmentRequests => "/parent-assessment-requests/",
            Self::Specialists => "/specialists/",
            Self::Progress => "/progress/",
            Self::Iep => "/iep/",
            Self::Users => "/users/",
        }
    }

    /// Item path, e.g. `/children/7/`
    pub fn item(self, id: impl std::fmt::Display) -> String {
        format!("{}{id}/", self.path())
    }

    /// Path of an action on an item, e.g. `/assessment-requests/3/approve/`
    pub fn action(self, id: impl std::fmt::Display, action: &str) -> String {
        format!("{}{id}/{}/", self.path(), action.trim_matches('/'))
    }
}
