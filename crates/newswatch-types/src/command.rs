//! The closed command set.
//!
//! Incoming message text is parsed into a `Command` exactly once at the
//! transport boundary; everything downstream matches exhaustively on the
//! enum. Free text that is not a slash command becomes `Command::Text` and
//! is interpreted contextually by the state machine (keyword to add, keyword
//! to remove, or yes/no confirmation).

/// A parsed conversational command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start` -- hard reset to the main menu.
    Start,
    /// `/add_keywords` -- begin collecting keywords to add.
    AddKeywords,
    /// `/remove_keyword` -- begin collecting keywords to remove.
    RemoveKeyword,
    /// `/view_keywords` -- list the session's keywords.
    ViewKeywords,
    /// `/done` -- leave the current keyword-editing state.
    Done,
    /// `/search_news` -- start monitoring.
    SearchNews,
    /// `/stop_searching` -- request to stop monitoring.
    StopSearching,
    /// `/help` -- usage text.
    Help,
    /// A slash command we do not recognize. Carries the command name.
    Unknown(String),
    /// Any non-command message text, trimmed.
    Text(String),
}

impl Command {
    /// Parse raw message text into a command.
    ///
    /// Slash commands may carry a `@botname` suffix (as Telegram appends in
    /// group chats); the suffix is ignored. Anything not starting with `/`
    /// is free text.
    pub fn parse(text: &str) -> Command {
        let trimmed = text.trim();

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Text(trimmed.to_string());
        };

        // "/cmd@bot arg" -> "cmd"
        let name = rest
            .split_whitespace()
            .next()
            .unwrap_or("")
            .split('@')
            .next()
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "start" => Command::Start,
            "add_keywords" => Command::AddKeywords,
            "remove_keyword" => Command::RemoveKeyword,
            "view_keywords" => Command::ViewKeywords,
            "done" => Command::Done,
            "search_news" => Command::SearchNews,
            "stop_searching" => Command::StopSearching,
            "help" => Command::Help,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("/add_keywords"), Command::AddKeywords);
        assert_eq!(Command::parse("/remove_keyword"), Command::RemoveKeyword);
        assert_eq!(Command::parse("/view_keywords"), Command::ViewKeywords);
        assert_eq!(Command::parse("/done"), Command::Done);
        assert_eq!(Command::parse("/search_news"), Command::SearchNews);
        assert_eq!(Command::parse("/stop_searching"), Command::StopSearching);
        assert_eq!(Command::parse("/help"), Command::Help);
    }

    #[test]
    fn test_parse_strips_bot_suffix() {
        assert_eq!(Command::parse("/start@newswatch_bot"), Command::Start);
        assert_eq!(Command::parse("/help@SomeBot"), Command::Help);
    }

    #[test]
    fn test_parse_is_case_insensitive_for_commands() {
        assert_eq!(Command::parse("/Start"), Command::Start);
        assert_eq!(Command::parse("/SEARCH_NEWS"), Command::SearchNews);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::parse("/frobnicate"),
            Command::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn test_parse_free_text_is_trimmed() {
        assert_eq!(
            Command::parse("  tesla  "),
            Command::Text("tesla".to_string())
        );
    }

    #[test]
    fn test_parse_text_is_not_lowercased() {
        // Normalization is the keyword layer's job, not the parser's.
        assert_eq!(
            Command::parse("Tesla"),
            Command::Text("Tesla".to_string())
        );
    }

    #[test]
    fn test_parse_command_with_trailing_args() {
        assert_eq!(Command::parse("/start now please"), Command::Start);
    }
}
