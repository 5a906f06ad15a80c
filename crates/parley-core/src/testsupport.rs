//! In-memory test doubles shared by transcript and relay tests.

use std::sync::Mutex;

use chrono::Utc;

use parley_types::error::StorageError;
use parley_types::message::{MessageRole, StoredMessage};

use crate::store::MessageStore;

/// In-memory [`MessageStore`] with the same ordering and update-last
/// semantics as the SQLite implementation.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    rows: Vec<StoredMessage>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Snapshot of all rows for a session, insertion order.
    pub fn rows_for(&self, session_id: &str) -> Vec<StoredMessage> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect()
    }
}

impl MessageStore for MemoryStore {
    async fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<i64, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.rows.push(StoredMessage {
            id,
            session_id: session_id.to_string(),
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn update_last(&self, session_id: &str, delta: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().unwrap();
        // Rows are kept in insertion order, so the last matching row is the
        // most recent by (created_at, id).
        if let Some(row) = inner
            .rows
            .iter_mut()
            .rev()
            .find(|m| m.session_id == session_id && m.role == MessageRole::Bot)
        {
            row.content.push_str(delta);
            return Ok(());
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.rows.push(StoredMessage {
            id,
            session_id: session_id.to_string(),
            role: MessageRole::Bot,
            content: delta.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn load_ordered(&self, session_id: &str) -> Result<Vec<StoredMessage>, StorageError> {
        Ok(self.rows_for(session_id))
    }
}
