//! Newswatch bot entry point.
//!
//! Binary name: `nwatch`
//!
//! Parses CLI arguments, initializes the database and the session service,
//! then runs the Telegram long-poll loop until Ctrl+C/SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use newswatch_core::session::SessionService;
use newswatch_infra::config::load_config;
use newswatch_infra::feed::BenzingaFeed;
use newswatch_infra::sqlite::{DatabasePool, SqliteDedupLedger, SqliteKeywordStore};
use newswatch_infra::telegram::TelegramClient;

/// Long-poll timeout passed to getUpdates.
const LONG_POLL_SECS: u64 = 30;
/// Backoff after a failed getUpdates call.
const POLL_RETRY: Duration = Duration::from_secs(5);

type Service =
    SessionService<BenzingaFeed, SqliteKeywordStore, SqliteDedupLedger, TelegramClient>;

#[derive(Parser)]
#[command(name = "nwatch", about = "Per-session keyword news alerts over Telegram")]
struct Cli {
    /// Data directory holding the database and config.toml.
    #[arg(long, env = "NEWSWATCH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,newswatch=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".newswatch")
        }
    };
    tokio::fs::create_dir_all(&data_dir).await?;

    let config = load_config(&data_dir).await;
    if config.telegram_token.is_empty() {
        anyhow::bail!(
            "no Telegram token configured; set telegram_token in {}/config.toml or TELEGRAM_BOT_TOKEN",
            data_dir.display()
        );
    }

    let db_url = format!("sqlite://{}/newswatch.db?mode=rwc", data_dir.display());
    let pool = DatabasePool::new(&db_url).await?;

    let telegram = Arc::new(TelegramClient::new(&config.telegram_token));
    let service: Arc<Service> = Arc::new(SessionService::new(
        Arc::new(BenzingaFeed::new(
            config.benzinga_token.clone(),
            config.feed_page_size,
        )),
        Arc::new(SqliteKeywordStore::new(pool.clone())),
        Arc::new(SqliteDedupLedger::new(pool)),
        Arc::clone(&telegram),
        Duration::from_secs(config.poll_interval_secs),
    ));

    tracing::info!(data_dir = %data_dir.display(), "newswatch started");

    run_update_loop(&service, &telegram).await;

    service.shutdown().await;
    tracing::info!("newswatch stopped");
    Ok(())
}

/// Consume Telegram updates until a shutdown signal arrives.
///
/// Updates are handled in arrival order, so commands within one chat are
/// processed sequentially -- the ordering the session service relies on.
async fn run_update_loop(service: &Service, telegram: &TelegramClient) {
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut offset: Option<i64> = None;

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            result = telegram.get_updates(offset, LONG_POLL_SECS) => match result {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        let reply = service.handle(update.chat_id, &update.text).await;
                        if let Err(err) = telegram.send_message(update.chat_id, &reply).await {
                            tracing::warn!(chat_id = update.chat_id, error = %err, "failed to send reply");
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "getUpdates failed, retrying");
                    tokio::time::sleep(POLL_RETRY).await;
                }
            },
        }
    }
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
