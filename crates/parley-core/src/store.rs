//! MessageStore trait definition.
//!
//! The single persistence seam of the relay: an append-only message log per
//! session with one mutation escape hatch (`update_last`) for the continue
//! flow. Implementations live in `parley-infra` (e.g. `SqliteMessageStore`)
//! and must serialize all mutations behind a single process-wide writer so
//! concurrent requests for the same session cannot interleave partial
//! updates to the last bot message.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use parley_types::error::StorageError;
use parley_types::message::{MessageRole, StoredMessage};

/// Repository trait for per-session message persistence.
pub trait MessageStore: Send + Sync {
    /// Insert a new message with the current timestamp and return its id.
    ///
    /// Content may be empty; no constraints are enforced.
    fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<i64, StorageError>> + Send;

    /// Append `delta` to the content of the most recent bot message for the
    /// session, or insert a fresh bot message if none exists.
    ///
    /// "Most recent" is decided by timestamp descending with the insertion
    /// id as a deterministic tie-break.
    fn update_last(
        &self,
        session_id: &str,
        delta: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// All messages for the session, ascending by timestamp then id.
    fn load_ordered(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMessage>, StorageError>> + Send;
}
