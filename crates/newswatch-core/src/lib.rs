//! Business logic for Newswatch.
//!
//! Defines the repository and collaborator traits (implementations live in
//! newswatch-infra), the conversation state machine, the per-session polling
//! engine, and the supervisor that owns the set of running polling tasks.

pub mod feed;
pub mod monitor;
pub mod notify;
pub mod repository;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;
