//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. This module provides a
//! `DatabasePool` with a multi-connection reader pool for concurrent reads
//! and a single-connection writer pool for serialized writes: at most one
//! mutating statement executes at a time across the whole store, regardless
//! of session. Both pools use WAL journal mode.
//!
//! Schema management is a presence check, not a migration chain: if the
//! `messages` table is missing or lacks the expected `created_at` column,
//! the table is dropped and recreated. Destructive, suitable only for a
//! fresh deployment.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection pool (up to 8) for concurrent SELECT queries.
/// - `writer`: Single-connection pool for serialized INSERT/UPDATE.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Create a new DatabasePool with split reader/writer connections.
    ///
    /// Runs the schema presence check on the writer pool before opening the
    /// reader pool. Both pools use WAL journal mode and a 5-second busy
    /// timeout.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        init_schema(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(read_opts)
            .await?;

        Ok(Self { reader, writer })
    }
}

/// Ensure the `messages` table exists with the expected shape.
///
/// Probes for the `created_at` column; any failure means the table is
/// missing or from an older layout, in which case it is recreated from
/// scratch (existing rows are lost).
async fn init_schema(writer: &SqlitePool) -> Result<(), sqlx::Error> {
    let probe = sqlx::query("SELECT created_at FROM messages LIMIT 1")
        .fetch_optional(writer)
        .await;

    if probe.is_ok() {
        return Ok(());
    }

    tracing::info!("messages table missing or outdated, recreating");
    sqlx::query("DROP TABLE IF EXISTS messages")
        .execute(writer)
        .await?;
    sqlx::query(
        r#"CREATE TABLE messages(
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               session_id TEXT NOT NULL,
               role TEXT NOT NULL,
               content TEXT NOT NULL,
               created_at TEXT NOT NULL
           )"#,
    )
    .execute(writer)
    .await?;
    sqlx::query("CREATE INDEX idx_messages_session ON messages(session_id, created_at, id)")
        .execute(writer)
        .await?;

    Ok(())
}

/// Resolve the data directory from `PARLEY_DATA_DIR`, falling back to
/// `~/.parley`.
pub fn resolve_data_dir() -> std::path::PathBuf {
    match std::env::var("PARLEY_DATA_DIR") {
        Ok(dir) => std::path::PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            std::path::PathBuf::from(home).join(".parley")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_creates_messages_table() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = DatabasePool::new(&url).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let table_names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert!(table_names.contains(&"messages"), "messages table missing");
    }

    #[tokio::test]
    async fn test_pool_wal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test_wal.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = DatabasePool::new(&url).await.unwrap();

        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();

        assert_eq!(result.0.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_pool_preserves_existing_rows_on_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test_reopen.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        {
            let pool = DatabasePool::new(&url).await.unwrap();
            sqlx::query(
                "INSERT INTO messages(session_id, role, content, created_at) VALUES (?,?,?,?)",
            )
            .bind("s1")
            .bind("user")
            .bind("hello")
            .bind("2026-01-01T00:00:00+00:00")
            .execute(&pool.writer)
            .await
            .unwrap();
        }

        let pool = DatabasePool::new(&url).await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        assert_eq!(count.0, 1, "reopen must not recreate a valid table");
    }

    #[tokio::test]
    async fn test_pool_recreates_outdated_table() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test_outdated.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        // Seed an old-layout table without the created_at column.
        {
            let opts = SqliteConnectOptions::from_str(&url)
                .unwrap()
                .create_if_missing(true);
            let seed = SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(opts)
                .await
                .unwrap();
            sqlx::query("CREATE TABLE messages(id INTEGER PRIMARY KEY, session_id TEXT)")
                .execute(&seed)
                .await
                .unwrap();
            sqlx::query("INSERT INTO messages(session_id) VALUES ('old')")
                .execute(&seed)
                .await
                .unwrap();
        }

        let pool = DatabasePool::new(&url).await.unwrap();

        // Old rows are gone, new layout is queryable.
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
        sqlx::query("SELECT created_at FROM messages LIMIT 1")
            .fetch_optional(&pool.reader)
            .await
            .unwrap();
    }

    #[test]
    fn test_resolve_data_dir_has_parley_component() {
        let dir = resolve_data_dir();
        let s = dir.to_string_lossy();
        assert!(s.contains("parley") || s.contains(".parley"), "got {s}");
    }
}
