//! Navigation capability injected into the session and transport layers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login, logout and the authorization-failure hook all redirect. They do it
//! through [`Navigator`] so the browser location (or a test double) can be
//! swapped without touching session code.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::sync::{Mutex, PoisonError};

pub trait Navigator: Send + Sync {
    /// Navigate to `location` (a path, optionally with a query string).
    fn go_to(&self, location: &str);

    /// Path of the current location, without query string.
    fn current_path(&self) -> String;
}

/// History-recording navigator for headless use and tests.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    /// Start at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at("/")
    }

    #[must_use]
    pub fn starting_at(location: &str) -> Self {
        Self { history: Mutex::new(vec![location.to_owned()]) }
    }

    /// Every location visited, oldest first, including the starting one.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Current location including its query string.
    #[must_use]
    pub fn current(&self) -> String {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_owned())
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for MemoryNavigator {
    fn go_to(&self, location: &str) {
        tracing::debug!(location, "navigate");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_owned());
    }

    fn current_path(&self) -> String {
        let current = self.current();
        match current.split_once('?') {
            Some((path, _)) => path.to_owned(),
            None => current,
        }
    }
}
