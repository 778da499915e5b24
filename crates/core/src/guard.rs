//! Navigation guards
//!
//! Both predicates are pure: they look at the resolved session and the
//! target view and answer render, wait, or redirect. Redirecting is left to
//! the caller.

use crate::routes::{AppRoute, Audience, RouteAccess};
use crate::types::{Role, UserProfile};

/// What the front end currently knows about the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    /// The token store has not been consulted yet
    Loading,
    Anonymous,
    Authenticated(UserProfile),
}

impl SessionView {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session unresolved; show a neutral waiting indicator
    Pending,
    Render,
    Redirect(AppRoute),
}

/// Authentication guard: anonymous visitors go to the audience's login entry
pub fn require_authenticated(session: &SessionView, audience: Audience) -> GuardDecision {
    match session {
        SessionView::Loading => GuardDecision::Pending,
        SessionView::Anonymous => GuardDecision::Redirect(AppRoute::login_entry(audience)),
        SessionView::Authenticated(_) => GuardDecision::Render,
    }
}

/// Role guard: a role outside `allowed` goes to its own landing page.
///
/// An empty `allowed` list places no role restriction.
pub fn require_role(user: &UserProfile, allowed: &[Role]) -> GuardDecision {
    if allowed.is_empty() || allowed.contains(&user.role) {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(AppRoute::landing(user.role))
    }
}

/// Run the guards that apply to `route`, authentication first
pub fn evaluate(route: &AppRoute, session: &SessionView) -> GuardDecision {
    match route.access() {
        RouteAccess::Public => GuardDecision::Render,
        RouteAccess::LoginEntry(_) => match session {
            SessionView::Loading => GuardDecision::Pending,
            SessionView::Anonymous => GuardDecision::Render,
            SessionView::Authenticated(user) => {
                GuardDecision::Redirect(AppRoute::landing(user.role))
            }
        },
        RouteAccess::Protected { audience, roles } => {
            match require_authenticated(session, audience) {
                GuardDecision::Render => {}
                other => return other,
            }
            match session.user() {
                Some(user) => require_role(user, roles),
                None => GuardDecision::Redirect(AppRoute::login_entry(audience)),
            }
        }
    }
}
