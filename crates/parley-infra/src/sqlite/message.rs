//! SQLite message store implementation.
//!
//! Implements `MessageStore` from `parley-core` using sqlx with split
//! read/write pools. All mutations go through the single-connection writer
//! pool; `update_last` additionally wraps its read-modify-write in one
//! transaction so concurrent commits for the same session cannot interleave.

use chrono::{DateTime, Utc};
use sqlx::Row;

use parley_core::store::MessageStore;
use parley_types::error::StorageError;
use parley_types::message::{MessageRole, StoredMessage};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageStore`.
pub struct SqliteMessageStore {
    pool: DatabasePool,
}

impl SqliteMessageStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row type
// ---------------------------------------------------------------------------

struct MessageRow {
    id: i64,
    session_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<StoredMessage, StorageError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| StorageError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(StoredMessage {
            id: self.id,
            session_id: self.session_id,
            role,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// MessageStore impl
// ---------------------------------------------------------------------------

impl MessageStore for SqliteMessageStore {
    async fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<i64, StorageError> {
        let result = sqlx::query(
            "INSERT INTO messages(session_id, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(role.to_string())
        .bind(content)
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    async fn update_last(&self, session_id: &str, delta: &str) -> Result<(), StorageError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        // Insertion-order id breaks timestamp ties deterministically.
        let last_bot = sqlx::query(
            r#"SELECT id, content FROM messages
               WHERE session_id = ? AND role = 'bot'
               ORDER BY created_at DESC, id DESC
               LIMIT 1"#,
        )
        .bind(session_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        match last_bot {
            Some(row) => {
                let id: i64 = row
                    .try_get("id")
                    .map_err(|e| StorageError::Query(e.to_string()))?;
                let content: String = row
                    .try_get("content")
                    .map_err(|e| StorageError::Query(e.to_string()))?;

                sqlx::query("UPDATE messages SET content = ? WHERE id = ?")
                    .bind(content + delta)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| StorageError::Query(e.to_string()))?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO messages(session_id, role, content, created_at) VALUES (?, 'bot', ?, ?)",
                )
                .bind(session_id)
                .bind(delta)
                .bind(format_datetime(&Utc::now()))
                .execute(&mut *tx)
                .await
                .map_err(|e| StorageError::Query(e.to_string()))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Query(e.to_string()))
    }

    async fn load_ordered(&self, session_id: &str) -> Result<Vec<StoredMessage>, StorageError> {
        let rows = sqlx::query(
            r#"SELECT * FROM messages
               WHERE session_id = ?
               ORDER BY created_at ASC, id ASC"#,
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let r = MessageRow::from_row(row).map_err(|e| StorageError::Query(e.to_string()))?;
            messages.push(r.into_message()?);
        }
        Ok(messages)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
