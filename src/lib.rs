//! # bankcore-client
//!
//! Client-side session layer for the BankCore banking front-end.
//!
//! This crate owns the bearer-token session, the HTTP pipeline that attaches
//! and evicts that token, and the navigation guard that keeps anonymous users
//! out of protected views. Views, the routing engine and the transport are
//! external; they are reached through the `Navigator`, `SessionStorage` and
//! `reqwest` seams.
//!
//! DESIGN
//! ======
//! One [`app::App`] is constructed at start-up and hands out shared handles.
//! The session service subscribes to authorization-failure notifications from
//! the API client instead of the client reaching back into the session.

pub mod app;
#[cfg(feature = "hydrate")]
pub mod browser;
pub mod config;
pub mod error;
pub mod navigation;
pub mod net;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use app::App;
pub use config::ClientConfig;
pub use error::{ApiError, AuthError};
pub use navigation::{MemoryNavigator, Navigator};
pub use routes::guard::{NavigationDecision, NavigationGuard};
pub use services::session::SessionService;
pub use state::session::{Session, User, UserId};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
