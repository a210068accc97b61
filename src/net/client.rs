//! Pre-configured HTTP pipeline for the BankCore API.
//!
//! Every request passes through two hooks:
//! - outbound: attach `Authorization: Bearer <token>` when storage holds a token
//!   (falling back to the default token set after login);
//! - inbound: on 401/403 evict the persisted session, redirect to `/login`
//!   unless already there, notify subscribers, then return the failure.
//!
//! ERROR HANDLING
//! ==============
//! The hook never swallows the failure: callers always receive
//! `ApiError::Status`. Storage errors during eviction are only logged.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::error_message;
use crate::config::ClientConfig;
use crate::error::{ApiError, is_auth_failure_status};
use crate::navigation::Navigator;
use crate::routes::LOGIN_PATH;
use crate::storage::{SessionStorage, TOKEN_KEY, evict_session};

/// Notification emitted when a request is rejected with 401 or 403.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    pub status: u16,
    /// API path of the rejected request, relative to the base URL.
    pub path: String,
}

type AuthFailureListener = Box<dyn Fn(&AuthFailure) + Send + Sync>;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    /// Sent when storage has no token. Set by login/initialize.
    default_token: RwLock<Option<String>>,
    listeners: RwLock<Vec<AuthFailureListener>>,
}

impl ApiClient {
    /// Build a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(
        config: &ClientConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            http: build_http(config)?,
            base_url: config.base_url.clone(),
            storage,
            navigator,
            default_token: RwLock::new(None),
            listeners: RwLock::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Set or remove the default bearer token.
    pub fn set_default_token(&self, token: Option<&str>) {
        *self.default_token.write().unwrap_or_else(PoisonError::into_inner) = token.map(str::to_owned);
    }

    #[must_use]
    pub fn default_token(&self) -> Option<String> {
        self.default_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribe to authorization failures.
    ///
    /// Listeners run synchronously inside the failing request, after storage
    /// eviction and the redirect. They must not subscribe further listeners.
    pub fn on_auth_failure<F>(&self, listener: F)
    where
        F: Fn(&AuthFailure) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(listener));
    }

    /// Start a request with default headers and the outbound hook applied.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] if the token is not a valid header value.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.outbound_token() {
            builder = builder.header(AUTHORIZATION, bearer_header(&token)?);
        }
        Ok(builder)
    }

    /// Send a request built by [`ApiClient::request`] through the inbound hook.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response arrives and
    /// [`ApiError::Status`] for any non-success status.
    pub async fn execute(&self, builder: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status = status.as_u16();
        let message = match response.text().await {
            Ok(body) => error_message(&body),
            Err(e) => {
                tracing::debug!(status, path, error = %e, "failed to read error body");
                None
            }
        };
        if is_auth_failure_status(status) {
            self.handle_auth_failure(status, path);
        } else {
            tracing::debug!(status, path, "request failed");
        }
        Err(ApiError::Status { status, message })
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body does not decode.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path)?;
        let response = self.execute(builder, path).await?;
        decode_json(response).await
    }

    /// `POST path` with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body does not decode.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path)?.json(body);
        let response = self.execute(builder, path).await?;
        decode_json(response).await
    }

    /// `POST path` with a JSON body and return the response text.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn post_text<B>(&self, path: &str, body: &B) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path)?.json(body);
        let response = self.execute(builder, path).await?;
        Ok(response.text().await?)
    }

    fn outbound_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => return Some(token),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "failed to read persisted token"),
        }
        self.default_token()
    }

    fn handle_auth_failure(&self, status: u16, path: &str) {
        tracing::warn!(status, path, "authorization failure, clearing persisted session");
        evict_session(self.storage.as_ref());
        self.set_default_token(None);

        if self.navigator.current_path() != LOGIN_PATH {
            self.navigator.go_to(LOGIN_PATH);
        }

        let failure = AuthFailure { status, path: path.to_owned() };
        for listener in self.listeners.read().unwrap_or_else(PoisonError::into_inner).iter() {
            listener(&failure);
        }
    }
}

fn bearer_header(token: &str) -> Result<HeaderValue, ApiError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);
    Ok(value)
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http(config: &ClientConfig) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| ApiError::HttpClientBuild(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn build_http(_config: &ClientConfig) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| ApiError::HttpClientBuild(e.to_string()))
}
