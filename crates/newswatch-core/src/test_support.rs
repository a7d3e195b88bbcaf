//! In-memory fakes for the collaborator traits, shared by the engine,
//! supervisor, and service tests.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use newswatch_types::error::{DeliveryError, FeedError, RepositoryError};
use newswatch_types::keyword::normalize;
use newswatch_types::session::SessionId;
use newswatch_types::story::Story;

use crate::feed::FeedSource;
use crate::notify::NotificationSink;
use crate::repository::{DedupLedger, KeywordStore};

/// Feed that serves a swappable batch of stories, or simulates an outage.
pub struct StaticFeed {
    stories: Mutex<Vec<Story>>,
    failing: Mutex<bool>,
}

impl StaticFeed {
    pub fn new(stories: Vec<Story>) -> Self {
        Self {
            stories: Mutex::new(stories),
            failing: Mutex::new(false),
        }
    }

    pub fn failing() -> Self {
        Self {
            stories: Mutex::new(Vec::new()),
            failing: Mutex::new(true),
        }
    }

    pub fn set(&self, stories: Vec<Story>) {
        *self.stories.lock().unwrap() = stories;
    }
}

impl FeedSource for StaticFeed {
    async fn fetch(&self) -> Result<Vec<Story>, FeedError> {
        if *self.failing.lock().unwrap() {
            return Err(FeedError::Http("simulated outage".to_string()));
        }
        Ok(self.stories.lock().unwrap().clone())
    }
}

/// In-memory keyword store with the same normalization and idempotence
/// semantics as the SQLite implementation.
pub struct MemoryKeywordStore {
    keywords: Mutex<HashMap<SessionId, BTreeSet<String>>>,
}

impl MemoryKeywordStore {
    pub fn new() -> Self {
        Self {
            keywords: Mutex::new(HashMap::new()),
        }
    }
}

impl KeywordStore for MemoryKeywordStore {
    async fn add(&self, session: SessionId, keyword: &str) -> Result<bool, RepositoryError> {
        let keyword = normalize(keyword)
            .ok_or_else(|| RepositoryError::InvalidKeyword(keyword.to_string()))?;
        Ok(self
            .keywords
            .lock()
            .unwrap()
            .entry(session)
            .or_default()
            .insert(keyword))
    }

    async fn remove(&self, session: SessionId, keyword: &str) -> Result<bool, RepositoryError> {
        let keyword = normalize(keyword)
            .ok_or_else(|| RepositoryError::InvalidKeyword(keyword.to_string()))?;
        Ok(self
            .keywords
            .lock()
            .unwrap()
            .get_mut(&session)
            .is_some_and(|set| set.remove(&keyword)))
    }

    async fn list(&self, session: SessionId) -> Result<Vec<String>, RepositoryError> {
        Ok(self
            .keywords
            .lock()
            .unwrap()
            .get(&session)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }
}

/// In-memory dedup ledger.
pub struct MemoryDedupLedger {
    processed: Mutex<HashSet<(SessionId, String)>>,
}

impl MemoryDedupLedger {
    pub fn new() -> Self {
        Self {
            processed: Mutex::new(HashSet::new()),
        }
    }
}

impl DedupLedger for MemoryDedupLedger {
    async fn is_processed(
        &self,
        session: SessionId,
        story_id: &str,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .processed
            .lock()
            .unwrap()
            .contains(&(session, story_id.to_string())))
    }

    async fn mark_processed(
        &self,
        session: SessionId,
        story_id: &str,
    ) -> Result<(), RepositoryError> {
        self.processed
            .lock()
            .unwrap()
            .insert((session, story_id.to_string()));
        Ok(())
    }
}

/// Sink that records every send and can fail the next N sends.
pub struct RecordingSink {
    sent: Mutex<Vec<(SessionId, String)>>,
    failures_remaining: AtomicUsize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failures_remaining: AtomicUsize::new(0),
        }
    }

    /// Make the next `count` sends fail.
    pub fn fail_next(&self, count: usize) {
        self.failures_remaining.store(count, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(SessionId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    async fn send(&self, session: SessionId, text: &str) -> Result<(), DeliveryError> {
        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(DeliveryError::Http("simulated send failure".to_string()));
        }
        self.sent.lock().unwrap().push((session, text.to_string()));
        Ok(())
    }
}
