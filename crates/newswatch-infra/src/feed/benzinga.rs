//! Benzinga news feed client.
//!
//! Implements [`FeedSource`] against the Benzinga v2 news REST endpoint.
//! Decoding is deliberately lenient: the response must be a JSON array, but
//! individual items missing a title or url are dropped with a debug log
//! rather than failing the whole batch.

use std::time::Duration;

use newswatch_core::feed::FeedSource;
use newswatch_types::error::FeedError;
use newswatch_types::story::Story;

/// Feed client for the Benzinga news API.
pub struct BenzingaFeed {
    client: reqwest::Client,
    base_url: String,
    token: String,
    page_size: u32,
}

impl BenzingaFeed {
    const DEFAULT_BASE_URL: &'static str = "https://api.benzinga.com/api/v2/news";

    pub fn new(token: String, page_size: u32) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            token,
            page_size,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Extract stories from a decoded feed response.
///
/// The endpoint returns a JSON array of story objects; anything else is
/// malformed. Items without both a non-empty `title` and `url` are skipped.
fn parse_stories(value: &serde_json::Value) -> Result<Vec<Story>, FeedError> {
    let items = value
        .as_array()
        .ok_or_else(|| FeedError::Decode("expected a JSON array of stories".to_string()))?;

    let mut stories = Vec::with_capacity(items.len());
    for item in items {
        let title = item.get("title").and_then(|v| v.as_str()).unwrap_or("");
        let url = item.get("url").and_then(|v| v.as_str()).unwrap_or("");
        if title.is_empty() || url.is_empty() {
            tracing::debug!("skipping feed item without title/url");
            continue;
        }
        stories.push(Story::new(title, url));
    }

    Ok(stories)
}

impl FeedSource for BenzingaFeed {
    async fn fetch(&self) -> Result<Vec<Story>, FeedError> {
        let response = self
            .client
            .get(&self.base_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("token", self.token.as_str())])
            .query(&[("pageSize", self.page_size)])
            .query(&[("displayOutput", "abstract")])
            .send()
            .await
            .map_err(|e| FeedError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Http(format!("feed returned status {status}")));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))?;

        parse_stories(&value)
    }
}
