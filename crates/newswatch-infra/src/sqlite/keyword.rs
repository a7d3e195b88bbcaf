//! SQLite keyword store implementation.
//!
//! Implements `KeywordStore` from `newswatch-core` using sqlx. Keywords are
//! normalized on the way in; the (session_id, keyword) primary key plus
//! `ON CONFLICT DO NOTHING` make duplicate adds a no-op.

use chrono::Utc;
use sqlx::Row;

use newswatch_core::repository::KeywordStore;
use newswatch_types::error::RepositoryError;
use newswatch_types::keyword::normalize;
use newswatch_types::session::SessionId;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KeywordStore`.
pub struct SqliteKeywordStore {
    pool: DatabasePool,
}

impl SqliteKeywordStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KeywordStore for SqliteKeywordStore {
    async fn add(&self, session: SessionId, keyword: &str) -> Result<bool, RepositoryError> {
        let keyword = normalize(keyword)
            .ok_or_else(|| RepositoryError::InvalidKeyword(keyword.to_string()))?;

        let result = sqlx::query(
            r#"INSERT INTO keywords (session_id, keyword, created_at)
               VALUES (?, ?, ?)
               ON CONFLICT (session_id, keyword) DO NOTHING"#,
        )
        .bind(session)
        .bind(&keyword)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, session: SessionId, keyword: &str) -> Result<bool, RepositoryError> {
        let keyword = normalize(keyword)
            .ok_or_else(|| RepositoryError::InvalidKeyword(keyword.to_string()))?;

        let result = sqlx::query("DELETE FROM keywords WHERE session_id = ? AND keyword = ?")
            .bind(session)
            .bind(&keyword)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, session: SessionId) -> Result<Vec<String>, RepositoryError> {
        let rows =
            sqlx::query("SELECT keyword FROM keywords WHERE session_id = ? ORDER BY keyword")
                .bind(session)
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut keywords = Vec::with_capacity(rows.len());
        for row in &rows {
            let keyword: String = row
                .try_get("keyword")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            keywords.push(keyword);
        }

        Ok(keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_normalizes_and_inserts() {
        let store = SqliteKeywordStore::new(test_pool().await);

        assert!(store.add(1, "  Tesla ").await.unwrap());
        assert_eq!(store.list(1).await.unwrap(), vec!["tesla"]);
    }

    #[tokio::test]
    async fn test_add_twice_leaves_one_row() {
        let store = SqliteKeywordStore::new(test_pool().await);

        assert!(store.add(1, "Tesla").await.unwrap());
        assert!(!store.add(1, "tesla").await.unwrap());
        assert_eq!(store.list(1).await.unwrap(), vec!["tesla"]);
    }

    #[tokio::test]
    async fn test_add_empty_keyword_rejected() {
        let store = SqliteKeywordStore::new(test_pool().await);
        assert!(store.add(1, "   ").await.is_err());
    }

    #[tokio::test]
    async fn test_remove_reports_whether_row_went() {
        let store = SqliteKeywordStore::new(test_pool().await);

        store.add(1, "tesla").await.unwrap();
        assert!(store.remove(1, " TESLA ").await.unwrap());
        assert!(!store.remove(1, "tesla").await.unwrap());
        assert!(store.list(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_ordered() {
        let store = SqliteKeywordStore::new(test_pool().await);

        store.add(1, "market").await.unwrap();
        store.add(1, "crypto").await.unwrap();
        store.add(1, "tesla").await.unwrap();

        assert_eq!(
            store.list(1).await.unwrap(),
            vec!["crypto", "market", "tesla"]
        );
    }

    #[tokio::test]
    async fn test_session_isolation() {
        let store = SqliteKeywordStore::new(test_pool().await);

        store.add(1, "tesla").await.unwrap();
        store.add(2, "crypto").await.unwrap();

        assert_eq!(store.list(1).await.unwrap(), vec!["tesla"]);
        assert_eq!(store.list(2).await.unwrap(), vec!["crypto"]);

        store.remove(1, "tesla").await.unwrap();
        assert_eq!(store.list(2).await.unwrap(), vec!["crypto"]);
    }
}
