//! Telegram Bot API transport.

pub mod client;

pub use client::{TelegramClient, Update};
