//! Streaming HTTP adapter for the remote chat completion API.

pub mod client;
pub mod streaming;
pub mod types;

pub use client::ClaudeProvider;
