//! Business logic layer for buzz.
//!
//! Services wrap the repositories in `buzz-db` with the forum's rules:
//! ownership checks, membership gating, validation, and the two ballot
//! models (write-once item votes, switchable poll votes).

pub mod services;

pub use services::*;
