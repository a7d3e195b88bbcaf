//! Shared domain types for Newswatch.
//!
//! This crate holds the vocabulary every other crate speaks: session state,
//! the command set, stories, keyword normalization, configuration, and the
//! error enums used across crate boundaries. It deliberately has no async
//! or I/O dependencies.

pub mod command;
pub mod config;
pub mod error;
pub mod keyword;
pub mod session;
pub mod story;
