//! HTTP request handlers.

pub mod chat;
pub mod execute;
pub mod upload;
