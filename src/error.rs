//! Error types for the transport and session layers.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and rejected requests surface as [`ApiError`]. The
//! session service wraps them in [`AuthError`] and derives the message shown
//! to the user with [`AuthError::user_message`]. Authorization failures on
//! ordinary requests are handled inside the API client and still returned to
//! the caller as `ApiError::Status`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::storage::StorageError;

/// Shown when a login error carries no usable message.
pub const LOGIN_FAILED_FALLBACK: &str = "login failed";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("request failed with status code {status}")]
    Status { status: u16, message: Option<String> },

    /// A success response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// HTTP status, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message supplied by the server in the error body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True for 401 and 403.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        self.status().is_some_and(is_auth_failure_status)
    }
}

#[must_use]
pub fn is_auth_failure_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The login response succeeded but carried no token.
    #[error("token not received")]
    MissingToken,

    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to encode user record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Registration input rejected before it was sent.
    #[error("{0}")]
    InvalidRegistration(String),
}

impl AuthError {
    /// Human-readable message for display next to the login form.
    ///
    /// Prefers the server-supplied message, then this error's own description,
    /// then [`LOGIN_FAILED_FALLBACK`].
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Self::Api(api) = self {
            if let Some(message) = api.server_message().filter(|m| !m.trim().is_empty()) {
                return message.to_owned();
            }
        }
        let own = self.to_string();
        if own.trim().is_empty() { LOGIN_FAILED_FALLBACK.to_owned() } else { own }
    }
}
