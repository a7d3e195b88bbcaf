//! SQLite dedup ledger implementation.
//!
//! Implements `DedupLedger` from `newswatch-core`. Marking is an idempotent
//! `INSERT ... ON CONFLICT DO NOTHING`, and the rows are durable: a session
//! resuming search after a restart never re-receives a recorded story.

use chrono::Utc;

use newswatch_core::repository::DedupLedger;
use newswatch_types::error::RepositoryError;
use newswatch_types::session::SessionId;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `DedupLedger`.
pub struct SqliteDedupLedger {
    pool: DatabasePool,
}

impl SqliteDedupLedger {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl DedupLedger for SqliteDedupLedger {
    async fn is_processed(
        &self,
        session: SessionId,
        story_id: &str,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query(
            "SELECT 1 FROM processed_stories WHERE session_id = ? AND story_id = ?",
        )
        .bind(session)
        .bind(story_id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn mark_processed(
        &self,
        session: SessionId,
        story_id: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO processed_stories (session_id, story_id, processed_at)
               VALUES (?, ?, ?)
               ON CONFLICT (session_id, story_id) DO NOTHING"#,
        )
        .bind(session)
        .bind(story_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
