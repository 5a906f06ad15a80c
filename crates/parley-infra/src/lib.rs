//! Infrastructure implementations for Parley.
//!
//! - [`sqlite`]: message store backed by sqlx/SQLite with split
//!   reader/writer pools.
//! - [`upstream`]: streaming HTTP adapter for the remote chat API.
//! - [`files`]: upload classification and metadata extraction.

pub mod files;
pub mod sqlite;
pub mod upstream;
