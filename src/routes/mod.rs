//! Route table and navigation targets.
//!
//! DESIGN
//! ======
//! The routing engine itself is external; this module only describes the
//! routes the guard needs to reason about and the [`Location`] values passed
//! between guard and navigator.

pub mod guard;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::fmt;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ROOT_PATH: &str = "/";

/// Query parameter carrying the originally requested path to the login view.
pub const REDIRECT_QUERY: &str = "redirect";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Dashboard,
    Accounts,
    Transfer,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::Accounts => "accounts",
            Self::Transfer => "transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub public: bool,
    pub requires_auth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    pub path: &'static str,
    pub meta: RouteMeta,
}

const PUBLIC: RouteMeta = RouteMeta { public: true, requires_auth: false };
const PROTECTED: RouteMeta = RouteMeta { public: false, requires_auth: true };

pub static ROUTES: [Route; 4] = [
    Route { name: RouteName::Login, path: LOGIN_PATH, meta: PUBLIC },
    Route { name: RouteName::Dashboard, path: DASHBOARD_PATH, meta: PROTECTED },
    Route { name: RouteName::Accounts, path: "/accounts", meta: PROTECTED },
    Route { name: RouteName::Transfer, path: "/transfer", meta: PROTECTED },
];

/// Outcome of matching a path against the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Route(&'static Route),
    /// Path is an alias for another path.
    Redirect(&'static str),
    Unmatched,
}

#[must_use]
pub fn resolve(path: &str) -> Resolved {
    let path = normalize_path(path);
    if path == ROOT_PATH {
        return Resolved::Redirect(DASHBOARD_PATH);
    }
    ROUTES
        .iter()
        .find(|route| route.path == path)
        .map_or(Resolved::Unmatched, Resolved::Route)
}

#[must_use]
pub fn by_name(name: RouteName) -> &'static Route {
    match name {
        RouteName::Login => &ROUTES[0],
        RouteName::Dashboard => &ROUTES[1],
        RouteName::Accounts => &ROUTES[2],
        RouteName::Transfer => &ROUTES[3],
    }
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}

// =============================================================================
// LOCATION
// =============================================================================

/// A navigation target: path plus ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self { path: path.to_owned(), query: Vec::new() }
    }

    /// Parse `/path?key=value&...`. Query values are percent-decoded.
    #[must_use]
    pub fn parse(full_path: &str) -> Self {
        let (path, query) = match full_path.split_once('?') {
            Some((path, query)) => (path, query),
            None => (full_path, ""),
        };
        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();
        let path = if path.is_empty() { ROOT_PATH } else { path };
        Self { path: path.to_owned(), query }
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value for `key`.
    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Path and encoded query, e.g. `/login?redirect=/accounts`.
    #[must_use]
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }

    /// Route-table entry for this location's path.
    #[must_use]
    pub fn resolve(&self) -> Resolved {
        resolve(&self.path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// Percent-encode a query component, keeping `/` readable.
fn encode(raw: &str) -> String {
    urlencoding::encode(raw).replace("%2F", "/")
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| spaced.clone(), std::borrow::Cow::into_owned)
}
