//! External story feed clients.

pub mod benzinga;

pub use benzinga::BenzingaFeed;
