//! HTTP layer for Parley.
//!
//! Axum-based routes with CORS, request tracing, and static file serving
//! for the bundled chat page.

pub mod error;
pub mod handlers;
pub mod router;
