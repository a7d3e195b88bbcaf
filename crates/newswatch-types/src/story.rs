//! Stories as delivered by the external feed.

use serde::{Deserialize, Serialize};

/// One unit of content from the external feed.
///
/// The URL doubles as the story's unique identifier for deduplication.
/// That conflates identity with location; it holds as long as the feed
/// never reuses a URL for different content (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Display title, matched against session keywords.
    pub title: String,
    /// Source location; also the dedup identifier.
    pub url: String,
}

impl Story {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// The identifier recorded in the dedup ledger.
    pub fn id(&self) -> &str {
        &self.url
    }
}
