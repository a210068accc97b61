//! Client configuration parsed from environment-style lookups.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

pub const BASE_URL_VAR: &str = "BANKCORE_API_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "BANKCORE_REQUEST_TIMEOUT_MS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is not an absolute http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every request path is appended to, without a trailing `/`.
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Build a config pointing at `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless the URL is absolute http(s).
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, ..Self::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `BANKCORE_API_BASE_URL`: default `http://127.0.0.1:8080/api/v1`
    /// - `BANKCORE_REQUEST_TIMEOUT_MS`: default 15000
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is not http(s).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup(BASE_URL_VAR) {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_API_BASE_URL.to_owned(),
        };
        let timeout_ms = parse_or(lookup(REQUEST_TIMEOUT_VAR).as_deref(), DEFAULT_REQUEST_TIMEOUT_MS);

        Ok(Self { base_url, request_timeout: Duration::from_millis(timeout_ms) })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn parse_or<T>(raw: Option<&str>, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
