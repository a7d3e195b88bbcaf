//! FeedSource trait definition.

use newswatch_types::error::FeedError;
use newswatch_types::story::Story;

/// Pull source of candidate stories.
///
/// No ordering, freshness, or uniqueness guarantees: the same story may
/// appear in consecutive fetches, so callers must deduplicate via the
/// ledger. Implementations live in newswatch-infra (e.g., `BenzingaFeed`).
pub trait FeedSource: Send + Sync {
    /// Fetch the current batch of candidate stories.
    fn fetch(&self)
        -> impl std::future::Future<Output = Result<Vec<Story>, FeedError>> + Send;
}
