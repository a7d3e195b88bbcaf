//! One fetch-filter-dispatch pass for a single session.
//!
//! Every failure inside a cycle is local: fetch errors skip the cycle,
//! store errors skip the affected step, and a failed send leaves the story
//! unmarked so the next cycle retries it. Nothing here is fatal.

use newswatch_types::session::SessionId;
use newswatch_types::story::Story;

use crate::feed::FeedSource;
use crate::notify::NotificationSink;
use crate::repository::{DedupLedger, KeywordStore};

/// Whether a story title matches at least one keyword.
///
/// Case-insensitive substring containment: keyword "tesla" matches both
/// "Tesla surges" and "teslascope". Keywords are already lower-cased by
/// normalization.
pub fn title_matches(title: &str, keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    keywords.iter().any(|keyword| title.contains(keyword.as_str()))
}

/// Render the notification text for a matched story.
pub fn format_story(story: &Story) -> String {
    format!("🚀 New story: {}\n{}", story.title, story.url)
}

/// Execute one poll cycle for a session. Returns how many notifications
/// were delivered (and marked) this cycle.
///
/// The keyword set is read fresh on every cycle, so edits made during an
/// active search take effect on the next cycle. A story is marked processed
/// only after its notification was sent successfully.
pub async fn run_poll_cycle<F, K, L, N>(
    session: SessionId,
    feed: &F,
    keywords: &K,
    ledger: &L,
    sink: &N,
) -> usize
where
    F: FeedSource,
    K: KeywordStore,
    L: DedupLedger,
    N: NotificationSink,
{
    let stories = match feed.fetch().await {
        Ok(stories) => stories,
        Err(err) => {
            tracing::warn!(%session, error = %err, "feed fetch failed, skipping cycle");
            return 0;
        }
    };

    let keyword_set = match keywords.list(session).await {
        Ok(keyword_set) => keyword_set,
        Err(err) => {
            tracing::warn!(%session, error = %err, "keyword read failed, skipping cycle");
            return 0;
        }
    };
    if keyword_set.is_empty() {
        return 0;
    }

    let mut delivered = 0;
    for story in &stories {
        if !title_matches(&story.title, &keyword_set) {
            continue;
        }

        match ledger.is_processed(session, story.id()).await {
            Ok(true) => continue,
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(%session, story_id = story.id(), error = %err, "dedup check failed, skipping story");
                continue;
            }
        }

        if let Err(err) = sink.send(session, &format_story(story)).await {
            // Unmarked on purpose: the next cycle retries the delivery.
            tracing::warn!(%session, story_id = story.id(), error = %err, "notification send failed");
            continue;
        }

        if let Err(err) = ledger.mark_processed(session, story.id()).await {
            tracing::error!(%session, story_id = story.id(), error = %err, "failed to record delivery");
            continue;
        }
        delivered += 1;
    }

    tracing::debug!(%session, stories = stories.len(), delivered, "poll cycle complete");
    delivered
}
