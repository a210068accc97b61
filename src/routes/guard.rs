//! Pre-navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router consults [`NavigationGuard::before_each`] before committing to
//! a target. The guard improves UX only; the API still validates every
//! token it receives.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::{DASHBOARD_PATH, LOGIN_PATH, Location, REDIRECT_QUERY, Resolved, RouteName};
use crate::services::session::SessionService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(Location),
}

#[derive(Clone)]
pub struct NavigationGuard {
    session: SessionService,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(session: SessionService) -> Self {
        Self { session }
    }

    /// Decide whether navigation to `to` (path plus optional query) may proceed.
    ///
    /// Recovers the session from storage first when it is not authenticated,
    /// which covers a fresh page load.
    #[must_use]
    pub fn before_each(&self, to: &str) -> NavigationDecision {
        let target = Location::parse(to);
        if let Resolved::Redirect(alias) = target.resolve() {
            return NavigationDecision::Redirect(Location::new(alias));
        }

        if !self.session.is_authenticated() {
            self.session.initialize();
        }
        let decision = decide(&target, self.session.is_authenticated());
        if let NavigationDecision::Redirect(location) = &decision {
            tracing::debug!(from = %target, to = %location, "navigation redirected");
        }
        decision
    }
}

/// Guard rules for a resolved target and the current authentication state.
#[must_use]
pub fn decide(target: &Location, authenticated: bool) -> NavigationDecision {
    let route = match target.resolve() {
        Resolved::Route(route) => Some(route),
        Resolved::Redirect(_) | Resolved::Unmatched => None,
    };
    let requires_auth = route.is_some_and(|r| r.meta.requires_auth);
    let is_login = route.is_some_and(|r| r.name == RouteName::Login);

    if requires_auth && !authenticated {
        return NavigationDecision::Redirect(
            Location::new(LOGIN_PATH).with_query(REDIRECT_QUERY, &target.full_path()),
        );
    }
    if is_login && authenticated {
        return NavigationDecision::Redirect(Location::new(DASHBOARD_PATH));
    }
    NavigationDecision::Allow
}
