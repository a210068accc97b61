//! Client-side state records.
//!
//! DESIGN
//! ======
//! Plain data only. Mutation rules live in `services`, which own the
//! instances; everything else works on clones.

pub mod session;
