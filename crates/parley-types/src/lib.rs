//! Shared domain types for Parley.
//!
//! Pure data shapes with no I/O: stored messages and roles, transcript
//! entries, the `/chat` request surface, upload response payloads, and the
//! error enums shared across crates.

pub mod api;
pub mod error;
pub mod message;
pub mod transcript;
pub mod upload;
