//! Auth-session record for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the navigation guard and by views; mutated only by
//! `SessionService`. `is_authenticated` mirrors `token.is_some()` at all
//! times, which is why the fields are private.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-side user identifier. The API may send a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Identity of the signed-in user, persisted as JSON under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub username: String,
}

impl User {
    /// Parse a persisted user record. Anything malformed yields `None`.
    #[must_use]
    pub fn from_persisted(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed persisted user record");
                None
            }
        }
    }
}

/// Authentication state tracking the current user and loading status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    is_authenticated: bool,
    loading: bool,
    error: Option<String>,
}

impl Session {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Adopt `token` and `user` as the authenticated identity.
    pub(crate) fn establish(&mut self, token: String, user: Option<User>) {
        self.token = Some(token);
        self.user = user;
        self.is_authenticated = true;
    }

    /// Drop token, user and the authenticated flag. Leaves loading/error alone.
    pub(crate) fn clear_identity(&mut self) {
        self.token = None;
        self.user = None;
        self.is_authenticated = false;
    }

    pub(crate) fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn finish_loading(&mut self, error: Option<String>) {
        self.loading = false;
        if error.is_some() {
            self.error = error;
        }
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }
}
