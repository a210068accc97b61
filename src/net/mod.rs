//! HTTP access to the BankCore API.
//!
//! DESIGN
//! ======
//! `client` wraps `reqwest` with the bearer-token hooks; `types` holds the
//! wire shapes of the auth endpoints.

pub mod client;
pub mod types;

pub use client::{ApiClient, AuthFailure};
