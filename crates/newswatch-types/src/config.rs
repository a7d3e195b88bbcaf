//! Runtime configuration.
//!
//! Deserialized from `config.toml` in the data directory; every field has a
//! default so a partial (or missing) file still yields a usable config.
//! Secrets may also arrive via environment variables -- see the loader in
//! newswatch-infra.

use serde::{Deserialize, Serialize};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telegram Bot API token.
    pub telegram_token: String,
    /// Benzinga news API token.
    pub benzinga_token: String,
    /// Seconds between poll cycles for each searching session.
    pub poll_interval_secs: u64,
    /// Stories requested per feed fetch.
    pub feed_page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram_token: String::new(),
            benzinga_token: String::new(),
            poll_interval_secs: 60,
            feed_page_size: 20,
        }
    }
}
