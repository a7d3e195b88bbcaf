//! KeywordStore and DedupLedger trait definitions.
//!
//! Implementations live in newswatch-infra (e.g., `SqliteKeywordStore`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//!
//! Both stores are keyed by session id; every operation touches a single
//! session's rows, so implementations need no cross-session locking.

use newswatch_types::error::RepositoryError;
use newswatch_types::session::SessionId;

/// Durable per-session keyword set.
///
/// Keywords are normalized (trimmed, lower-cased) before storage and are
/// unique per (session, keyword) pair.
pub trait KeywordStore: Send + Sync {
    /// Add a keyword for a session. Returns `true` when a new row was
    /// inserted, `false` when the keyword was already present (a duplicate
    /// add is a no-op, not an error).
    fn add(
        &self,
        session: SessionId,
        keyword: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Remove a keyword for a session. Returns whether a row was removed.
    fn remove(
        &self,
        session: SessionId,
        keyword: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// All normalized keywords for a session, in stable display order.
    fn list(
        &self,
        session: SessionId,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;
}

/// Durable record of (session, story) pairs already delivered.
///
/// Survives process restart: a session resuming search never re-receives a
/// previously seen story.
pub trait DedupLedger: Send + Sync {
    /// Whether this story was already delivered to this session.
    fn is_processed(
        &self,
        session: SessionId,
        story_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Record a delivery. Idempotent: marking the same pair twice (e.g.,
    /// two overlapping poll cycles) must not error or duplicate rows.
    fn mark_processed(
        &self,
        session: SessionId,
        story_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
