//! Registry of running per-session polling tasks.
//!
//! One task per searching session, tracked by a cancellation token and a
//! join handle. Starting an already-monitored session is a no-op; stopping
//! cancels only that session's task and waits for its loop to exit, so at
//! most the in-flight cycle completes after a confirmed stop.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use newswatch_types::session::SessionId;

use crate::feed::FeedSource;
use crate::monitor::engine::run_poll_cycle;
use crate::notify::NotificationSink;
use crate::repository::{DedupLedger, KeywordStore};

struct MonitorHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

/// Owns the set of currently-active polling tasks, keyed by session.
pub struct MonitorSupervisor<F, K, L, N> {
    feed: Arc<F>,
    keywords: Arc<K>,
    ledger: Arc<L>,
    sink: Arc<N>,
    period: Duration,
    tasks: DashMap<SessionId, MonitorHandle>,
}

impl<F, K, L, N> MonitorSupervisor<F, K, L, N>
where
    F: FeedSource + 'static,
    K: KeywordStore + 'static,
    L: DedupLedger + 'static,
    N: NotificationSink + 'static,
{
    pub fn new(
        feed: Arc<F>,
        keywords: Arc<K>,
        ledger: Arc<L>,
        sink: Arc<N>,
        period: Duration,
    ) -> Self {
        Self {
            feed,
            keywords,
            ledger,
            sink,
            period,
            tasks: DashMap::new(),
        }
    }

    /// Start a polling task for the session. Returns `false` (and does
    /// nothing) when one is already running.
    pub fn start(&self, session: SessionId) -> bool {
        match self.tasks.entry(session) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let token = CancellationToken::new();
                let join = tokio::spawn(run_monitor(
                    session,
                    Arc::clone(&self.feed),
                    Arc::clone(&self.keywords),
                    Arc::clone(&self.ledger),
                    Arc::clone(&self.sink),
                    self.period,
                    token.clone(),
                ));
                slot.insert(MonitorHandle { token, join });
                tracing::info!(%session, "monitoring started");
                true
            }
        }
    }

    /// Cancel the session's polling task and wait for its loop to exit.
    /// Returns `false` when no task was running.
    pub async fn stop(&self, session: SessionId) -> bool {
        let Some((_, handle)) = self.tasks.remove(&session) else {
            return false;
        };
        handle.token.cancel();
        if let Err(err) = handle.join.await {
            if err.is_panic() {
                tracing::error!(%session, "monitor task panicked");
            }
        }
        tracing::info!(%session, "monitoring stopped");
        true
    }

    /// Whether a polling task is running for the session.
    pub fn is_active(&self, session: SessionId) -> bool {
        self.tasks.contains_key(&session)
    }

    /// Number of sessions currently being monitored.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Stop every polling task (process shutdown).
    pub async fn shutdown(&self) {
        let sessions: Vec<SessionId> = self.tasks.iter().map(|entry| *entry.key()).collect();
        for session in sessions {
            self.stop(session).await;
        }
    }
}

/// The polling loop: one cycle immediately, then one per period, until the
/// token is cancelled. There is no self-terminating condition.
async fn run_monitor<F, K, L, N>(
    session: SessionId,
    feed: Arc<F>,
    keywords: Arc<K>,
    ledger: Arc<L>,
    sink: Arc<N>,
    period: Duration,
    token: CancellationToken,
) where
    F: FeedSource,
    K: KeywordStore,
    L: DedupLedger,
    N: NotificationSink,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                run_poll_cycle(session, &*feed, &*keywords, &*ledger, &*sink).await;
            }
        }
    }
    tracing::debug!(%session, "monitor loop exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryDedupLedger, MemoryKeywordStore, RecordingSink, StaticFeed};
    use newswatch_types::story::Story;

    const PERIOD: Duration = Duration::from_millis(20);

    struct Fixture {
        supervisor: MonitorSupervisor<StaticFeed, MemoryKeywordStore, MemoryDedupLedger, RecordingSink>,
        feed: Arc<StaticFeed>,
        store: Arc<MemoryKeywordStore>,
        sink: Arc<RecordingSink>,
    }

    async fn fixture(session: SessionId, keywords: &[&str], stories: Vec<Story>) -> Fixture {
        let feed = Arc::new(StaticFeed::new(stories));
        let store = Arc::new(MemoryKeywordStore::new());
        for keyword in keywords {
            store.add(session, keyword).await.unwrap();
        }
        let sink = Arc::new(RecordingSink::new());
        let supervisor = MonitorSupervisor::new(
            Arc::clone(&feed),
            Arc::clone(&store),
            Arc::new(MemoryDedupLedger::new()),
            Arc::clone(&sink),
            PERIOD,
        );
        Fixture {
            supervisor,
            feed,
            store,
            sink,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_start_is_idempotent() {
        let fx = fixture(1, &["tesla"], vec![]).await;

        assert!(fx.supervisor.start(1));
        assert!(!fx.supervisor.start(1));
        assert_eq!(fx.supervisor.active_count(), 1);

        fx.supervisor.shutdown().await;
        assert_eq!(fx.supervisor.active_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stop_without_task_is_noop() {
        let fx = fixture(1, &[], vec![]).await;
        assert!(!fx.supervisor.stop(1).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_running_task_delivers_and_dedups() {
        let fx = fixture(
            1,
            &["crypto"],
            vec![Story::new("Crypto rally", "u1")],
        )
        .await;

        fx.supervisor.start(1);
        // Several periods pass; the story must still be delivered only once.
        tokio::time::sleep(PERIOD * 5).await;
        fx.supervisor.stop(1).await;

        assert_eq!(fx.sink.sent().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stop_halts_delivery_of_new_stories() {
        let fx = fixture(1, &["crypto"], vec![]).await;

        fx.supervisor.start(1);
        tokio::time::sleep(PERIOD * 2).await;
        assert!(fx.supervisor.stop(1).await);
        assert!(!fx.supervisor.is_active(1));

        // New matching content after the stop must never be delivered.
        fx.feed.set(vec![Story::new("Crypto crash", "u2")]);
        tokio::time::sleep(PERIOD * 5).await;
        assert!(fx.sink.sent().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stop_affects_only_target_session() {
        let fx = fixture(1, &["crypto"], vec![]).await;
        fx.store.add(2, "crypto").await.unwrap();

        fx.supervisor.start(1);
        fx.supervisor.start(2);
        assert_eq!(fx.supervisor.active_count(), 2);

        fx.supervisor.stop(1).await;
        assert!(!fx.supervisor.is_active(1));
        assert!(fx.supervisor.is_active(2));

        // Session 2 keeps delivering.
        fx.feed.set(vec![Story::new("Crypto crash", "u2")]);
        tokio::time::sleep(PERIOD * 5).await;
        let sent = fx.sink.sent();
        assert!(sent.iter().all(|(session, _)| *session == 2));
        assert!(!sent.is_empty());

        fx.supervisor.shutdown().await;
    }
}
