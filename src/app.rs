//! Application context.
//!
//! DESIGN
//! ======
//! `App` is built once at start-up and wires storage, navigator, API client,
//! session service and guard together. Clone is cheap; all inner fields are
//! Arc-wrapped or Clone.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::navigation::Navigator;
use crate::net::ApiClient;
use crate::routes::guard::NavigationGuard;
use crate::services::session::SessionService;
use crate::storage::SessionStorage;

#[derive(Clone)]
pub struct App {
    pub api: Arc<ApiClient>,
    pub session: SessionService,
    pub guard: NavigationGuard,
}

impl App {
    /// Wire up the client stack.
    ///
    /// The session starts empty; the guard recovers it from storage on the
    /// first navigation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(
        config: &ClientConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let api = Arc::new(ApiClient::new(config, Arc::clone(&storage), Arc::clone(&navigator))?);
        let session = SessionService::new(Arc::clone(&api), storage, navigator);
        let guard = NavigationGuard::new(session.clone());
        tracing::debug!(base_url = %config.base_url, "client stack ready");
        Ok(Self { api, session, guard })
    }

    /// Browser wiring: `localStorage` and `window.location`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client fails to build.
    #[cfg(feature = "hydrate")]
    pub fn in_browser(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(
            config,
            Arc::new(crate::browser::BrowserStorage),
            Arc::new(crate::browser::BrowserNavigator),
        )
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
