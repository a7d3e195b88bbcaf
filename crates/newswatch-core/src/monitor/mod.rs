//! Feed monitoring: the per-session polling cycle and the supervisor that
//! owns the set of running polling tasks.

pub mod engine;
pub mod supervisor;

pub use engine::{format_story, run_poll_cycle, title_matches};
pub use supervisor::MonitorSupervisor;
