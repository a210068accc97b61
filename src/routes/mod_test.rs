use super::*;

// =============================================================
// Route table
// =============================================================

#[test]
fn resolve_known_routes() {
    assert_eq!(resolve("/login"), Resolved::Route(by_name(RouteName::Login)));
    assert_eq!(resolve("/accounts"), Resolved::Route(by_name(RouteName::Accounts)));
    assert_eq!(resolve("/transfer/"), Resolved::Route(by_name(RouteName::Transfer)));
}

#[test]
fn resolve_root_redirects_to_dashboard() {
    assert_eq!(resolve("/"), Resolved::Redirect(DASHBOARD_PATH));
    assert_eq!(resolve(""), Resolved::Redirect(DASHBOARD_PATH));
}

#[test]
fn resolve_unknown_path_is_unmatched() {
    assert_eq!(resolve("/settings"), Resolved::Unmatched);
}

#[test]
fn login_is_the_only_public_route() {
    let public: Vec<RouteName> = ROUTES.iter().filter(|r| r.meta.public).map(|r| r.name).collect();
    assert_eq!(public, vec![RouteName::Login]);
    assert!(ROUTES.iter().filter(|r| !r.meta.public).all(|r| r.meta.requires_auth));
}

#[test]
fn by_name_matches_route_name() {
    for name in [RouteName::Login, RouteName::Dashboard, RouteName::Accounts, RouteName::Transfer] {
        assert_eq!(by_name(name).name, name);
        assert_eq!(by_name(name).path.trim_start_matches('/'), name.as_str());
    }
}

// =============================================================
// Location
// =============================================================

#[test]
fn location_without_query_renders_path() {
    assert_eq!(Location::new("/accounts").full_path(), "/accounts");
}

#[test]
fn location_redirect_query_keeps_slashes() {
    let loc = Location::new(LOGIN_PATH).with_query(REDIRECT_QUERY, "/accounts");
    assert_eq!(loc.full_path(), "/login?redirect=/accounts");
    assert_eq!(loc.to_string(), "/login?redirect=/accounts");
}

#[test]
fn location_nested_query_survives_parse() {
    let loc = Location::new(LOGIN_PATH).with_query(REDIRECT_QUERY, "/transfer?from=1&to=2");
    let parsed = Location::parse(&loc.full_path());
    assert_eq!(parsed.path(), LOGIN_PATH);
    assert_eq!(parsed.query(REDIRECT_QUERY), Some("/transfer?from=1&to=2"));
}

#[test]
fn location_parse_splits_pairs() {
    let loc = Location::parse("/transfer?from=1&to=2&note=rent+may");
    assert_eq!(loc.path(), "/transfer");
    assert_eq!(loc.query("from"), Some("1"));
    assert_eq!(loc.query("to"), Some("2"));
    assert_eq!(loc.query("note"), Some("rent may"));
    assert_eq!(loc.query("missing"), None);
}

#[test]
fn location_parse_empty_path_is_root() {
    assert_eq!(Location::parse("?x=1").path(), ROOT_PATH);
}
