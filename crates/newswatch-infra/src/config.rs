//! Configuration loader.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`Config`]. Falls back to defaults when the file is missing or
//! malformed. API tokens may be supplied (or overridden) via environment
//! variables, which take precedence over the file.

use std::path::Path;

use newswatch_types::config::Config;

/// Environment variable holding the Telegram Bot API token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the Benzinga API token.
pub const BENZINGA_TOKEN_ENV: &str = "BENZINGA_API_KEY";

/// Load configuration from `{data_dir}/config.toml`, then apply environment
/// overrides for the secrets.
///
/// - Missing file: defaults, logged at debug.
/// - Unreadable or unparsable file: defaults, logged as a warning.
pub async fn load_config(data_dir: &Path) -> Config {
    let config_path = data_dir.join("config.toml");

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                Config::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            Config::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            Config::default()
        }
    };

    if let Ok(token) = std::env::var(TELEGRAM_TOKEN_ENV) {
        if !token.is_empty() {
            config.telegram_token = token;
        }
    }
    if let Ok(token) = std::env::var(BENZINGA_TOKEN_ENV) {
        if !token.is_empty() {
            config.benzinga_token = token;
        }
    }

    config
}
