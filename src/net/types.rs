//! Wire types for the `/auth` endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::state::session::{User, UserId};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const REGISTER_ENDPOINT: &str = "/auth/register";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of a successful login. Every field is optional on the wire; a
/// missing token is rejected by the session service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    /// Server-side id. Zero, empty and non-integer values read as absent.
    #[serde(default, rename = "userId", deserialize_with = "lenient_user_id")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
}

fn lenient_user_id<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_i64().filter(|&n| n != 0).map(UserId::Number),
        Some(Value::String(s)) if !s.is_empty() => Some(UserId::Text(s)),
        Some(other) => {
            tracing::debug!(user_id = %other, "ignoring unusable userId in login response");
            None
        }
    };
    Ok(id)
}

impl LoginResponse {
    /// Token, ignoring an empty string.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// User identity for a login submitted as `submitted_username`.
    ///
    /// With a server id the submitted name is kept alongside it; without one
    /// the server's username wins over the submitted one.
    #[must_use]
    pub fn user_for(&self, submitted_username: &str) -> User {
        match &self.user_id {
            Some(id) => User { id: Some(id.clone()), username: submitted_username.to_owned() },
            None => User {
                id: None,
                username: self
                    .username
                    .clone()
                    .filter(|u| !u.is_empty())
                    .unwrap_or_else(|| submitted_username.to_owned()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl RegisterRequest {
    /// Check the constraints the server enforces, so obviously bad input never
    /// leaves the client.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        let username_len = self.username.trim().chars().count();
        if username_len == 0 {
            return Err("username is required".to_owned());
        }
        if !(3..=50).contains(&username_len) {
            return Err("username must be between 3 and 50 characters".to_owned());
        }
        if self.password.trim().is_empty() {
            return Err("password is required".to_owned());
        }
        if self.password.chars().count() < 6 {
            return Err("password must be at least 6 characters".to_owned());
        }
        if self.email.trim().is_empty() {
            return Err("email is required".to_owned());
        }
        if !self.email.contains('@') {
            return Err("email must be valid".to_owned());
        }
        Ok(())
    }
}

/// Longest plain-text error body taken verbatim as a server message.
const PLAIN_MESSAGE_MAX_CHARS: usize = 200;

/// Error body returned by the API: either `{message}` or an RFC 7807
/// problem detail.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Best-effort server message from a raw error body.
///
/// JSON bodies yield `message`, then `detail`. A body that is not JSON is
/// used as-is when it is a short single line, which covers the plain-text
/// rejections of `/auth/register`.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            let parsed: ErrorBody = serde_json::from_value(value).ok()?;
            parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .or_else(|| parsed.detail.filter(|d| !d.trim().is_empty()))
        }
        Err(_) => plain_message(body),
    }
}

fn plain_message(body: &str) -> Option<String> {
    let text = body.trim();
    let usable = !text.is_empty()
        && !text.contains('\n')
        && !text.starts_with('<')
        && text.chars().count() <= PLAIN_MESSAGE_MAX_CHARS;
    usable.then(|| text.to_owned())
}
