//! Stateful client services.

pub mod session;
