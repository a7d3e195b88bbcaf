//! SQLite persistence via sqlx.

pub mod keyword;
pub mod pool;
pub mod processed;

pub use keyword::SqliteKeywordStore;
pub use pool::DatabasePool;
pub use processed::SqliteDedupLedger;
