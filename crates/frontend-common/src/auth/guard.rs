//! Role guards for page initialisation
//!
//! Pages call a guard before doing any setup and return early unless the
//! outcome is [`GuardOutcome::Allowed`]. Denials have already redirected
//! (and, for a wrong role, notified the user) by the time they return.

use super::manager::SessionManager;
use ara_core::{Role, UserRecord};

/// Result of a role check
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Signed in with a permitted role
    Allowed(UserRecord),
    /// No complete session is stored; sent to the login page
    DeniedNoSession,
    /// Signed in, but the role is not permitted; notified and sent to the root
    DeniedWrongRole { required: Vec<Role>, actual: Role },
    /// Session storage could not be read; access is denied
    Unavailable,
}

impl GuardOutcome {
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    pub const fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Allowed(user) => Some(user),
            _ => None,
        }
    }
}

impl SessionManager {
    /// Allow only users with `role`
    pub fn require_role(&self, role: Role) -> GuardOutcome {
        let notice = format!("Access denied. This page is for {role}s only.");
        self.guard(std::slice::from_ref(&role), notice)
    }

    /// Allow users holding any of `roles`
    pub fn require_any_role(&self, roles: &[Role]) -> GuardOutcome {
        let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
        let notice = format!("Access denied. This page is for {} only.", names.join(", "));
        self.guard(roles, notice)
    }

    fn guard(&self, allowed: &[Role], notice: String) -> GuardOutcome {
        let login = self.routes().login();

        let session = match self.vault().load() {
            Ok(session) => session,
            Err(err) => {
                tracing::error!(error = %err, "Session unreadable, denying access");
                self.navigator().redirect(&login);
                return GuardOutcome::Unavailable;
            }
        };

        let Some(session) = session else {
            tracing::warn!("Not authenticated, redirecting to login");
            self.navigator().redirect(&login);
            return GuardOutcome::DeniedNoSession;
        };

        let user = session.user;
        if allowed.contains(&user.role) {
            return GuardOutcome::Allowed(user);
        }

        tracing::error!(
            user = user.identifier(),
            role = %user.role,
            required = ?allowed,
            "Role not permitted on this page"
        );
        self.navigator().notify(&notice);
        self.navigator().redirect(&login);
        GuardOutcome::DeniedWrongRole {
            required: allowed.to_vec(),
            actual: user.role,
        }
    }
}
