//! Session orchestration.
//!
//! Owns the in-memory state registry and ties the pure state machine to its
//! side effects: keyword store mutations and supervisor start/stop. One
//! `handle` call per incoming message; commands for a single session are
//! assumed to arrive sequentially (the transport's update loop guarantees
//! this), while different sessions run fully in parallel.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use newswatch_types::command::Command;
use newswatch_types::session::{SessionId, SessionState};

use crate::feed::FeedSource;
use crate::monitor::MonitorSupervisor;
use crate::notify::NotificationSink;
use crate::repository::{DedupLedger, KeywordStore};
use crate::session::machine::{Decision, Effect, decide, replies};

const STARTED: &str = "🔍 Monitoring started. Send /stop_searching to stop.";
const STOPPED: &str =
    "Monitoring stopped. You can edit your keywords now; send /done when finished.";
const EMPTY_LIST: &str = "You have no keywords yet. Add some with /add_keywords.";
const SAVE_FAILED: &str = "Couldn't save that keyword right now. Try again.";
const REMOVE_FAILED: &str = "Couldn't update your keywords right now. Try again.";

/// Per-session command handling and monitoring lifecycle.
pub struct SessionService<F, K, L, N> {
    states: DashMap<SessionId, SessionState>,
    keywords: Arc<K>,
    supervisor: MonitorSupervisor<F, K, L, N>,
}

impl<F, K, L, N> SessionService<F, K, L, N>
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
        poll_period: Duration,
    ) -> Self {
        Self {
            states: DashMap::new(),
            keywords: Arc::clone(&keywords),
            supervisor: MonitorSupervisor::new(feed, keywords, ledger, sink, poll_period),
        }
    }

    /// Handle one incoming message for a session and produce the reply.
    ///
    /// A rejected command replies with the explanation and mutates nothing;
    /// an accepted one commits the state transition together with its side
    /// effect.
    pub async fn handle(&self, session: SessionId, text: &str) -> String {
        let command = Command::parse(text);
        let state = self.state_of(session);

        // The keyword count gates search-news only; skip the store read for
        // everything else. A read failure counts as an empty set, which
        // safely rejects the search.
        let keyword_count = if matches!(command, Command::SearchNews) {
            match self.keywords.list(session).await {
                Ok(list) => list.len(),
                Err(err) => {
                    tracing::warn!(%session, error = %err, "keyword read failed during search-news");
                    0
                }
            }
        } else {
            0
        };

        match decide(state, &command, keyword_count) {
            Decision::Reject { reason } => {
                tracing::debug!(%session, %state, ?command, "command rejected");
                reason
            }
            Decision::Accept { next, effect } => self.apply(session, next, effect).await,
        }
    }

    /// Current conversational state (new sessions start `Idle`).
    pub fn state_of(&self, session: SessionId) -> SessionState {
        self.states
            .get(&session)
            .map(|state| *state)
            .unwrap_or_default()
    }

    /// Whether a polling task is running for the session.
    pub fn is_monitoring(&self, session: SessionId) -> bool {
        self.supervisor.is_active(session)
    }

    /// Stop every polling task (process shutdown).
    pub async fn shutdown(&self) {
        self.supervisor.shutdown().await;
    }

    fn set_state(&self, session: SessionId, state: SessionState) {
        self.states.insert(session, state);
    }

    async fn apply(&self, session: SessionId, next: SessionState, effect: Effect) -> String {
        match effect {
            Effect::Reply(text) => {
                self.set_state(session, next);
                text
            }

            Effect::AddKeyword(keyword) => {
                self.set_state(session, next);
                match self.keywords.add(session, &keyword).await {
                    Ok(true) => format!("Added \"{keyword}\"."),
                    Ok(false) => format!("\"{keyword}\" is already on your list."),
                    Err(err) => {
                        tracing::error!(%session, %keyword, error = %err, "keyword insert failed");
                        SAVE_FAILED.to_string()
                    }
                }
            }

            Effect::RemoveKeyword(keyword) => {
                self.set_state(session, next);
                match self.keywords.remove(session, &keyword).await {
                    Ok(true) => format!("Removed \"{keyword}\"."),
                    Ok(false) => format!("\"{keyword}\" is not on your list."),
                    Err(err) => {
                        tracing::error!(%session, %keyword, error = %err, "keyword delete failed");
                        REMOVE_FAILED.to_string()
                    }
                }
            }

            Effect::ListKeywords => {
                // A read failure surfaces as an empty list rather than an
                // error reply.
                let keywords = match self.keywords.list(session).await {
                    Ok(keywords) => keywords,
                    Err(err) => {
                        tracing::warn!(%session, error = %err, "keyword list failed");
                        Vec::new()
                    }
                };
                // ViewingKeywords is transient: clear back to Idle once the
                // response is composed.
                self.set_state(session, SessionState::Idle);

                if keywords.is_empty() {
                    EMPTY_LIST.to_string()
                } else {
                    let mut reply = String::from("Your keywords:");
                    for keyword in &keywords {
                        reply.push_str("\n- ");
                        reply.push_str(keyword);
                    }
                    reply
                }
            }

            Effect::StartSearch => {
                self.set_state(session, next);
                self.supervisor.start(session);
                STARTED.to_string()
            }

            Effect::StopSearch => {
                self.supervisor.stop(session).await;
                self.set_state(session, next);
                STOPPED.to_string()
            }

            Effect::Reset { stop_search } => {
                if stop_search {
                    self.supervisor.stop(session).await;
                }
                self.set_state(session, SessionState::Idle);
                replies::START.to_string()
            }
        }
    }
}
