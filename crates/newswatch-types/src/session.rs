//! Session identity and conversational state.
//!
//! A session maps 1:1 to a chat: the identifier is the transport's chat id.
//! Conversational state lives only in process memory -- a restart resets
//! every session to `Idle`.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Opaque per-conversation identifier (the Telegram chat id).
pub type SessionId = i64;

/// Conversational state of one session.
///
/// Every incoming command is checked against the current state before any
/// side effect runs; commands not enabled for the state are rejected with
/// an explanation and zero mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Main menu. Every other state is re-enterable from here.
    Idle,
    /// Free-text messages are interpreted as keywords to add.
    AwaitingKeywordAdd,
    /// Free-text messages are interpreted as keywords to remove.
    AwaitingKeywordRemoval,
    /// A polling task is running for this session.
    Searching,
    /// A stop was requested; waiting for a yes/no confirmation.
    AwaitingStopConfirmation,
    /// Post-stop keyword editing menu.
    ManagingKeywords,
    /// Transient state while the keyword list is being rendered; cleared
    /// back to `Idle` immediately after the response is sent.
    ViewingKeywords,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::AwaitingKeywordAdd => "awaiting_keyword_add",
            SessionState::AwaitingKeywordRemoval => "awaiting_keyword_removal",
            SessionState::Searching => "searching",
            SessionState::AwaitingStopConfirmation => "awaiting_stop_confirmation",
            SessionState::ManagingKeywords => "managing_keywords",
            SessionState::ViewingKeywords => "viewing_keywords",
        };
        write!(f, "{name}")
    }
}
