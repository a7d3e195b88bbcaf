//! The conversation state machine.
//!
//! `decide` is a pure function from (current state, command, keyword count)
//! to a [`Decision`]: either an accepted transition carrying the next state
//! and a declarative [`Effect`], or a rejection carrying the user-facing
//! explanation. No side effect runs here; the session service executes the
//! effect only after the transition is accepted, so state and data mutation
//! commit together or not at all.

use newswatch_types::command::Command;
use newswatch_types::keyword::normalize;
use newswatch_types::session::SessionState;

/// User-facing reply texts produced by the state machine.
pub mod replies {
    pub const START: &str = "Hi! I watch the news feed for your keywords.\n\
        /add_keywords - subscribe to keywords\n\
        /search_news - start monitoring\n\
        /help - everything else";

    pub const HELP: &str = "Commands:\n\
        /add_keywords - send keywords to add, one per message\n\
        /remove_keyword - send keywords to remove, one per message\n\
        /view_keywords - show your keyword list\n\
        /search_news - start monitoring the feed\n\
        /stop_searching - stop monitoring\n\
        /done - finish keyword editing\n\
        /start - reset";

    pub const ADD_PROMPT: &str =
        "Send me keywords to add, one per message. Send /done when finished.";
    pub const REMOVE_PROMPT: &str =
        "Send me keywords to remove, one per message. Send /done when finished.";
    pub const DONE: &str = "Done. Back to the main menu.";
    pub const CONFIRM_STOP: &str = "Stop monitoring? Reply yes or no.";
    pub const RESUME: &str = "Okay, still watching the feed.";

    pub const ONLY_STOP: &str =
        "I'm monitoring the feed right now. Send /stop_searching to stop first.";
    pub const YES_OR_NO: &str = "Please reply yes or no.";
    pub const NO_KEYWORDS: &str =
        "You have no keywords yet. Add some with /add_keywords first.";
    pub const EMPTY_KEYWORD: &str = "That keyword is empty. Send some text.";
    pub const NOT_SEARCHING: &str = "I'm not monitoring right now.";
    pub const NOTHING_TO_FINISH: &str = "Nothing to finish. Try /add_keywords or /help.";
    pub const FINISH_FIRST: &str = "Finish the current keyword editing first (/done).";
    pub const VIEW_ONLY_FROM_MENU: &str =
        "Keyword listing is available from the main menu. Send /done first.";
    pub const UNRECOGNIZED_TEXT: &str =
        "I didn't understand that. Send /help for the command list.";
}

/// Side effect requested by an accepted transition.
///
/// Executed by the session service after the transition is accepted; the
/// variants that touch a store or the supervisor produce their reply from
/// the execution outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// No side effect; respond with this text.
    Reply(String),
    /// Insert the (already normalized) keyword.
    AddKeyword(String),
    /// Delete the (already normalized) keyword if present.
    RemoveKeyword(String),
    /// Render the session's keyword list.
    ListKeywords,
    /// Start the session's polling task.
    StartSearch,
    /// Cancel the session's polling task.
    StopSearch,
    /// Hard reset (`/start`); cancels the polling task when one is running.
    Reset { stop_search: bool },
}

/// Outcome of checking a command against the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept { next: SessionState, effect: Effect },
    Reject { reason: String },
}

fn accept(next: SessionState, effect: Effect) -> Decision {
    Decision::Accept { next, effect }
}

fn reject(reason: &str) -> Decision {
    Decision::Reject {
        reason: reason.to_string(),
    }
}

/// Decide what a command does in the given state.
///
/// `keyword_count` is consulted only for `search-news` (monitoring with an
/// empty keyword set is rejected); callers may pass 0 for every other
/// command.
pub fn decide(state: SessionState, command: &Command, keyword_count: usize) -> Decision {
    // /start is a hard reset from any state. Leaving Searching (or the stop
    // confirmation that shields it) must also cancel the polling task.
    if matches!(command, Command::Start) {
        let stop_search = matches!(
            state,
            SessionState::Searching | SessionState::AwaitingStopConfirmation
        );
        return accept(SessionState::Idle, Effect::Reset { stop_search });
    }

    match state {
        SessionState::Searching => match command {
            Command::StopSearching => accept(
                SessionState::AwaitingStopConfirmation,
                Effect::Reply(replies::CONFIRM_STOP.to_string()),
            ),
            _ => reject(replies::ONLY_STOP),
        },

        SessionState::AwaitingStopConfirmation => match command {
            Command::Text(text) => match text.trim().to_lowercase().as_str() {
                "yes" => accept(SessionState::ManagingKeywords, Effect::StopSearch),
                "no" => accept(
                    SessionState::Searching,
                    Effect::Reply(replies::RESUME.to_string()),
                ),
                _ => reject(replies::YES_OR_NO),
            },
            _ => reject(replies::YES_OR_NO),
        },

        // ViewingKeywords is cleared to Idle right after the list reply goes
        // out; treat a command racing that clear exactly like Idle.
        SessionState::Idle | SessionState::ViewingKeywords => match command {
            Command::AddKeywords => accept(
                SessionState::AwaitingKeywordAdd,
                Effect::Reply(replies::ADD_PROMPT.to_string()),
            ),
            Command::RemoveKeyword => accept(
                SessionState::AwaitingKeywordRemoval,
                Effect::Reply(replies::REMOVE_PROMPT.to_string()),
            ),
            Command::ViewKeywords => {
                accept(SessionState::ViewingKeywords, Effect::ListKeywords)
            }
            Command::SearchNews => search_decision(keyword_count),
            Command::Help => accept(state, Effect::Reply(replies::HELP.to_string())),
            Command::Done => reject(replies::NOTHING_TO_FINISH),
            Command::StopSearching => reject(replies::NOT_SEARCHING),
            Command::Text(_) => reject(replies::UNRECOGNIZED_TEXT),
            Command::Unknown(name) => {
                Decision::Reject {
                    reason: format!("Unknown command /{name}. Send /help for the command list."),
                }
            }
            Command::Start => unreachable!("handled above"),
        },

        SessionState::ManagingKeywords => match command {
            Command::AddKeywords => accept(
                SessionState::AwaitingKeywordAdd,
                Effect::Reply(replies::ADD_PROMPT.to_string()),
            ),
            Command::RemoveKeyword => accept(
                SessionState::AwaitingKeywordRemoval,
                Effect::Reply(replies::REMOVE_PROMPT.to_string()),
            ),
            Command::Done => accept(
                SessionState::Idle,
                Effect::Reply(replies::DONE.to_string()),
            ),
            Command::Help => accept(state, Effect::Reply(replies::HELP.to_string())),
            Command::ViewKeywords => reject(replies::VIEW_ONLY_FROM_MENU),
            Command::SearchNews => reject(replies::FINISH_FIRST),
            Command::StopSearching => reject(replies::NOT_SEARCHING),
            Command::Text(_) => reject(replies::UNRECOGNIZED_TEXT),
            Command::Unknown(name) => Decision::Reject {
                reason: format!("Unknown command /{name}. Send /help for the command list."),
            },
            Command::Start => unreachable!("handled above"),
        },

        SessionState::AwaitingKeywordAdd => match command {
            Command::Text(text) => match normalize(text) {
                Some(keyword) => accept(state, Effect::AddKeyword(keyword)),
                None => reject(replies::EMPTY_KEYWORD),
            },
            Command::Done => accept(
                SessionState::Idle,
                Effect::Reply(replies::DONE.to_string()),
            ),
            // search-news auto-clears the keyword-editing state first.
            Command::SearchNews => search_decision(keyword_count),
            Command::Help => accept(state, Effect::Reply(replies::HELP.to_string())),
            Command::StopSearching => reject(replies::NOT_SEARCHING),
            _ => reject(replies::FINISH_FIRST),
        },

        SessionState::AwaitingKeywordRemoval => match command {
            Command::Text(text) => match normalize(text) {
                Some(keyword) => accept(state, Effect::RemoveKeyword(keyword)),
                None => reject(replies::EMPTY_KEYWORD),
            },
            Command::Done => accept(
                SessionState::Idle,
                Effect::Reply(replies::DONE.to_string()),
            ),
            Command::SearchNews => search_decision(keyword_count),
            Command::Help => accept(state, Effect::Reply(replies::HELP.to_string())),
            Command::StopSearching => reject(replies::NOT_SEARCHING),
            _ => reject(replies::FINISH_FIRST),
        },
    }
}

fn search_decision(keyword_count: usize) -> Decision {
    if keyword_count == 0 {
        reject(replies::NO_KEYWORDS)
    } else {
        accept(SessionState::Searching, Effect::StartSearch)
    }
}
