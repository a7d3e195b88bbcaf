//! NotificationSink trait definition.

use newswatch_types::error::DeliveryError;
use newswatch_types::session::SessionId;

/// Delivers a formatted text message to a session.
///
/// Implementations live in newswatch-infra (e.g., `TelegramClient`).
pub trait NotificationSink: Send + Sync {
    /// Send `text` to the given session. A returned error means the message
    /// was (as far as we know) not delivered.
    fn send(
        &self,
        session: SessionId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;
}
