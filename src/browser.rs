//! Browser-backed storage and navigation (`hydrate` feature).
//!
//! Both types look the window up on every call instead of holding `web-sys`
//! handles, which keeps them `Send + Sync`.

use crate::navigation::Navigator;
use crate::storage::{SessionStorage, StorageError};

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".to_owned()))
}

fn js_error(op: &str, err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(format!("localStorage {op} failed: {err:?}"))
}

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(|e| js_error("read", &e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?.set_item(key, value).map_err(|e| js_error("write", &e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?.remove_item(key).map_err(|e| js_error("remove", &e))
    }
}

/// `window.location`. `go_to` performs a full page navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn go_to(&self, location: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(location) {
            tracing::warn!(location, error = ?e, "navigation failed");
        }
    }

    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_owned())
    }
}
