//! Telegram Bot API client.
//!
//! Covers the two methods the bot needs: `getUpdates` long-polling for
//! incoming messages and `sendMessage` for replies and notifications.
//! Implements [`NotificationSink`] for the outgoing direction.
//!
//! The bot token is part of the request URL per the Telegram API; it is
//! never logged.

use std::time::Duration;

use serde::Deserialize;

use newswatch_core::notify::NotificationSink;
use newswatch_types::error::DeliveryError;
use newswatch_types::session::SessionId;

/// Errors talking to the Telegram Bot API.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// Request failed at the HTTP layer.
    #[error("telegram request failed: {0}")]
    Http(String),

    /// The API answered with `ok: false`.
    #[error("telegram api error: {0}")]
    Api(String),
}

/// An incoming text message, flattened from the raw update payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Monotonic update id; pass `max + 1` as the next offset.
    pub update_id: i64,
    pub chat_id: SessionId,
    pub text: String,
}

/// Client for the Telegram Bot API.
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    /// Seconds of slack added to the HTTP timeout over the long-poll timeout.
    const TIMEOUT_SLACK_SECS: u64 = 10;

    pub fn new(token: &str) -> Self {
        Self::with_base_url(format!("https://api.telegram.org/bot{token}"))
    }

    /// Build a client against an explicit base URL (testing or proxies).
    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30 + Self::TIMEOUT_SLACK_SECS))
            .build()
            .expect("failed to create reqwest client");

        Self { client, base_url }
    }

    /// Long-poll for incoming updates.
    ///
    /// Returns only text messages; other update kinds (edits, stickers,
    /// joins) are skipped. `offset` acknowledges everything below it.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let mut request = self
            .client
            .get(format!("{}/getUpdates", self.base_url))
            .query(&[("timeout", timeout_secs)]);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TelegramError::Http(e.to_string()))?;

        let envelope: ApiResponse<Vec<RawUpdate>> = response
            .json()
            .await
            .map_err(|e| TelegramError::Http(e.to_string()))?;

        let raw = unwrap_envelope(envelope)?;
        Ok(flatten_updates(raw))
    }

    /// Send a text message to a chat.
    pub async fn send_message(
        &self,
        chat_id: SessionId,
        text: &str,
    ) -> Result<(), TelegramError> {
        let response = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&serde_json::json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await
            .map_err(|e| TelegramError::Http(e.to_string()))?;

        let envelope: ApiResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| TelegramError::Http(e.to_string()))?;

        unwrap_envelope(envelope)?;
        Ok(())
    }
}

impl NotificationSink for TelegramClient {
    async fn send(&self, session: SessionId, text: &str) -> Result<(), DeliveryError> {
        self.send_message(session, text).await.map_err(|err| match err {
            TelegramError::Http(msg) => DeliveryError::Http(msg),
            TelegramError::Api(msg) => DeliveryError::Rejected(msg),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct RawUpdate {
    update_id: i64,
    #[serde(default)]
    message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    chat: RawChat,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawChat {
    id: i64,
}

fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, TelegramError> {
    if !envelope.ok {
        return Err(TelegramError::Api(
            envelope
                .description
                .unwrap_or_else(|| "no description".to_string()),
        ));
    }
    envelope
        .result
        .ok_or_else(|| TelegramError::Api("ok response without result".to_string()))
}

fn flatten_updates(raw: Vec<RawUpdate>) -> Vec<Update> {
    raw.into_iter()
        .filter_map(|update| {
            let message = update.message?;
            let text = message.text?;
            Some(Update {
                update_id: update.update_id,
                chat_id: message.chat.id,
                text,
            })
        })
        .collect()
}
