//! Session context provider and role guard component

use crate::auth::{GuardOutcome, SessionManager};
use ara_core::Role;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub manager: SessionManager,
    pub children: Children,
}

/// Provides the session manager to descendants and resumes the refresh
/// timer for a session left by a previous page
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    {
        let manager = props.manager.clone();
        use_effect_with((), move |_| {
            if let Err(err) = manager.resume() {
                tracing::warn!(error = %err, "Could not resume session");
            }
        });
    }

    html! {
        <ContextProvider<SessionManager> context={props.manager.clone()}>
            {props.children.clone()}
        </ContextProvider<SessionManager>>
    }
}

/// Hook to use the session manager
#[hook]
pub fn use_session() -> SessionManager {
    use_context::<SessionManager>()
        .expect("SessionManager not found. Make sure to wrap your component with SessionProvider")
}

#[derive(Properties, PartialEq)]
pub struct RequireRoleProps {
    /// Roles allowed to see the children
    pub roles: Vec<Role>,
    pub children: Children,
}

/// Renders its children only after the role guard allows the current user.
///
/// Denied users are redirected by the guard; nothing is rendered for them.
#[function_component(RequireRole)]
pub fn require_role(props: &RequireRoleProps) -> Html {
    let manager = use_session();
    let outcome = use_state(|| Option::<GuardOutcome>::None);

    {
        let outcome = outcome.clone();
        use_effect_with(props.roles.clone(), move |roles| {
            outcome.set(Some(manager.require_any_role(roles)));
        });
    }

    match &*outcome {
        Some(outcome) if outcome.is_allowed() => html! { <>{ props.children.clone() }</> },
        _ => html! {},
    }
}
