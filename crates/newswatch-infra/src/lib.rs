//! Infrastructure implementations for Newswatch.
//!
//! SQLite-backed stores (sqlx), the Benzinga feed client, the Telegram Bot
//! API client, and configuration loading. Everything here implements a trait
//! defined in newswatch-core.

pub mod config;
pub mod feed;
pub mod sqlite;
pub mod telegram;
