//! SQLite persistence layer.

pub mod message;
pub mod pool;

pub use message::SqliteMessageStore;
pub use pool::DatabasePool;
