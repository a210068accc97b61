use std::sync::Arc;

use super::*;
use crate::app::test_helpers::{UNREACHABLE_BASE_URL, fixture, fixture_with_storage};
use crate::storage::{MemoryStorage, SessionStorage, TOKEN_KEY, USER_KEY};

fn redirect_to(full_path: &str) -> NavigationDecision {
    NavigationDecision::Redirect(Location::parse(full_path))
}

// =============================================================
// decide
// =============================================================

#[test]
fn decide_protected_route_without_session_redirects_to_login() {
    let decision = decide(&Location::parse("/accounts"), false);
    let NavigationDecision::Redirect(location) = decision else {
        panic!("expected redirect");
    };
    assert_eq!(location.full_path(), "/login?redirect=/accounts");
    assert_eq!(location.query(REDIRECT_QUERY), Some("/accounts"));
}

#[test]
fn decide_preserves_target_query_in_redirect() {
    let decision = decide(&Location::parse("/transfer?from=1"), false);
    let NavigationDecision::Redirect(location) = decision else {
        panic!("expected redirect");
    };
    assert_eq!(location.path(), LOGIN_PATH);
    assert_eq!(location.query(REDIRECT_QUERY), Some("/transfer?from=1"));
}

#[test]
fn decide_login_while_authenticated_redirects_to_dashboard() {
    assert_eq!(decide(&Location::parse("/login"), true), redirect_to("/dashboard"));
}

#[test]
fn decide_login_while_anonymous_is_allowed() {
    assert_eq!(decide(&Location::parse("/login?redirect=/accounts"), false), NavigationDecision::Allow);
}

#[test]
fn decide_protected_route_while_authenticated_is_allowed() {
    for path in ["/dashboard", "/accounts", "/transfer"] {
        assert_eq!(decide(&Location::parse(path), true), NavigationDecision::Allow, "{path}");
    }
}

#[test]
fn decide_unknown_route_is_allowed() {
    assert_eq!(decide(&Location::parse("/help"), false), NavigationDecision::Allow);
    assert_eq!(decide(&Location::parse("/help"), true), NavigationDecision::Allow);
}

// =============================================================
// NavigationGuard
// =============================================================

#[test]
fn guard_without_any_session_redirects_to_login() {
    let fx = fixture(UNREACHABLE_BASE_URL);
    assert_eq!(fx.app.guard.before_each("/accounts"), redirect_to("/login?redirect=/accounts"));
    assert!(!fx.app.session.is_authenticated());
}

#[test]
fn guard_recovers_session_from_storage_on_fresh_load() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "abc123").unwrap();
    storage.set(USER_KEY, r#"{"username":"alice"}"#).unwrap();
    let fx = fixture_with_storage(UNREACHABLE_BASE_URL, storage);
    assert!(!fx.app.session.is_authenticated());

    assert_eq!(fx.app.guard.before_each("/accounts"), NavigationDecision::Allow);
    assert!(fx.app.session.is_authenticated());
    assert_eq!(fx.app.session.snapshot().user().map(|u| u.username.as_str()), Some("alice"));
}

#[test]
fn guard_redirects_authenticated_user_away_from_login() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "abc123").unwrap();
    let fx = fixture_with_storage(UNREACHABLE_BASE_URL, storage);
    fx.app.session.initialize();

    assert_eq!(fx.app.guard.before_each("/login"), redirect_to("/dashboard"));
}

#[test]
fn guard_keeps_in_memory_session_without_rereading_storage() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "abc123").unwrap();
    let fx = fixture_with_storage(UNREACHABLE_BASE_URL, Arc::clone(&storage));
    fx.app.session.initialize();
    storage.remove(TOKEN_KEY).unwrap();

    assert_eq!(fx.app.guard.before_each("/transfer"), NavigationDecision::Allow);
}

#[test]
fn guard_applies_root_redirect_first() {
    let fx = fixture(UNREACHABLE_BASE_URL);
    assert_eq!(fx.app.guard.before_each("/"), redirect_to("/dashboard"));
}

#[test]
fn guard_allows_login_for_anonymous_user() {
    let fx = fixture(UNREACHABLE_BASE_URL);
    assert_eq!(fx.app.guard.before_each("/login"), NavigationDecision::Allow);
}

#[test]
fn guard_after_logout_redirects_to_login() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "abc123").unwrap();
    let fx = fixture_with_storage(UNREACHABLE_BASE_URL, storage);
    assert_eq!(fx.app.guard.before_each("/dashboard"), NavigationDecision::Allow);

    fx.app.session.logout();

    assert_eq!(fx.app.guard.before_each("/dashboard"), redirect_to("/login?redirect=/dashboard"));
}
