//! Application state wiring the relay pipeline together.
//!
//! `RelayService` is generic over its store and upstream traits; AppState
//! pins it to the SQLite store and the hosted Claude provider.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parley_core::relay::RelayService;
use parley_infra::sqlite::{DatabasePool, SqliteMessageStore};
use parley_infra::upstream::ClaudeProvider;

/// Concrete relay service pinned to the infra implementations.
pub type ConcreteRelayService = RelayService<SqliteMessageStore, ClaudeProvider>;

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelayService>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Connect to the database under `data_dir` and wire the relay service.
    pub async fn init(data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("parley.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let store = Arc::new(SqliteMessageStore::new(db_pool));
        let upstream = Arc::new(ClaudeProvider::new());
        let relay = Arc::new(RelayService::new(store, upstream));

        Ok(Self {
            relay,
            data_dir: data_dir.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_data_dir_and_database() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("parley");

        let state = AppState::init(&data_dir).await.unwrap();

        assert_eq!(state.data_dir, data_dir);
        assert!(data_dir.join("parley.db").exists());
    }
}
