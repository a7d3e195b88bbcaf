//! Per-session conversation handling.
//!
//! `machine` holds the pure transition function; `service` owns the state
//! registry, executes effects against the stores and the supervisor, and
//! produces the reply text.

pub mod machine;
pub mod service;

pub use machine::{Decision, Effect, decide};
pub use service::SessionService;
