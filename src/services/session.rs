//! Session service: login, logout and session recovery.
//!
//! DESIGN
//! ======
//! The service is the only writer of the [`Session`] record and of the
//! persisted `token`/`user` pair. It is constructed once per application and
//! cloned into whatever needs it; clones share state.
//!
//! On construction it subscribes to the API client's authorization-failure
//! notifications and drops the in-memory identity when one arrives. The
//! client has already evicted storage and redirected by then, so the
//! subscription only has memory to clean up.
//!
//! TRADE-OFFS
//! ==========
//! Concurrent `login` calls are not de-duplicated. Each runs to completion
//! and the last one to commit wins; callers are expected to disable the
//! form while `loading` is set.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::error::AuthError;
use crate::navigation::Navigator;
use crate::net::ApiClient;
use crate::net::types::{LOGIN_ENDPOINT, LoginRequest, LoginResponse, REGISTER_ENDPOINT, RegisterRequest};
use crate::routes::{DASHBOARD_PATH, LOGIN_PATH};
use crate::state::session::{Session, User};
use crate::storage::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY, evict_session};

#[derive(Clone)]
pub struct SessionService {
    inner: Arc<Inner>,
}

struct Inner {
    state: RwLock<Session>,
    api: Arc<ApiClient>,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
}

impl SessionService {
    /// Create the service with an empty session and subscribe it to `api`'s
    /// authorization failures.
    #[must_use]
    pub fn new(api: Arc<ApiClient>, storage: Arc<dyn SessionStorage>, navigator: Arc<dyn Navigator>) -> Self {
        let inner = Arc::new(Inner { state: RwLock::new(Session::default()), api, storage, navigator });

        let weak: Weak<Inner> = Arc::downgrade(&inner);
        inner.api.on_auth_failure(move |failure| {
            if let Some(inner) = weak.upgrade() {
                tracing::info!(status = failure.status, path = %failure.path, "session revoked by server");
                inner.write().clear_identity();
            }
        });

        Self { inner }
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_authenticated()
    }

    #[must_use]
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.inner.api
    }

    /// Authenticate against `POST /auth/login` and commit the session.
    ///
    /// On success the token and user are stored in memory and in persisted
    /// storage, the client's default token is set and the navigator is sent
    /// to `/dashboard`. On failure the session's `error` holds a displayable
    /// message. `loading` is cleared either way.
    ///
    /// Storage is written before memory is committed. If either write fails
    /// both keys are removed and the session stays unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the request fails, the response carries no
    /// token, or the session cannot be persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        self.inner.write().begin_loading();
        tracing::info!(username, "login requested");

        let result = self.try_login(username, password).await;

        let error = match &result {
            Ok(user) => {
                tracing::info!(username = %user.username, "login succeeded");
                None
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(username, error = %e, "login failed");
                Some(message)
            }
        };
        self.inner.write().finish_loading(error);
        result
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let body = LoginRequest { username, password };
        let response: LoginResponse = self.inner.api.post_json(LOGIN_ENDPOINT, &body).await?;

        let token = response.token().ok_or(AuthError::MissingToken)?.to_owned();
        let user = response.user_for(username);
        let user_json = serde_json::to_string(&user)?;

        if let Err(e) = self.persist(&token, &user_json) {
            evict_session(self.inner.storage.as_ref());
            self.inner.write().clear_identity();
            self.inner.api.set_default_token(None);
            return Err(e.into());
        }

        self.inner.write().establish(token.clone(), Some(user.clone()));
        self.inner.api.set_default_token(Some(&token));
        self.inner.navigator.go_to(DASHBOARD_PATH);
        Ok(user)
    }

    fn persist(&self, token: &str, user_json: &str) -> Result<(), StorageError> {
        self.inner.storage.set(TOKEN_KEY, token)?;
        self.inner.storage.set(USER_KEY, user_json)
    }

    /// Forget the session everywhere and go to `/login`. Never fails.
    pub fn logout(&self) {
        {
            let mut state = self.inner.write();
            state.clear_identity();
            state.clear_error();
        }
        evict_session(self.inner.storage.as_ref());
        self.inner.api.set_default_token(None);
        tracing::info!("logged out");
        self.inner.navigator.go_to(LOGIN_PATH);
    }

    /// Recover the session from persisted storage.
    ///
    /// Read-only on storage and idempotent. A malformed user record leaves
    /// `user` empty without affecting the token.
    pub fn initialize(&self) {
        let token = match self.inner.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted token");
                None
            }
        };

        let Some(token) = token else {
            self.inner.write().clear_identity();
            return;
        };

        let user = match self.inner.storage.get(USER_KEY) {
            Ok(raw) => raw.as_deref().and_then(User::from_persisted),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted user");
                None
            }
        };

        tracing::debug!(has_user = user.is_some(), "session restored from storage");
        self.inner.api.set_default_token(Some(&token));
        self.inner.write().establish(token, user);
    }

    /// Create an account via `POST /auth/register`. Session state is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidRegistration`] for input the server would
    /// reject, or the request error.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, AuthError> {
        request.validate().map_err(AuthError::InvalidRegistration)?;
        let confirmation = self.inner.api.post_text(REGISTER_ENDPOINT, request).await?;
        tracing::info!(username = %request.username, "account registered");
        Ok(confirmation)
    }
}

impl Inner {
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
