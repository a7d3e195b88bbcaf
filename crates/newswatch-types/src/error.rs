use thiserror::Error;

/// Errors from repository operations (used by trait definitions in
/// newswatch-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("invalid keyword: {0}")]
    InvalidKeyword(String),
}

/// Errors from the external story feed. Never fatal: the polling engine
/// logs these and skips the cycle.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(String),

    #[error("feed returned malformed data: {0}")]
    Decode(String),
}

/// Errors delivering a notification to a session. The engine logs these
/// and leaves the story unmarked so the next cycle retries it.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("send failed: {0}")]
    Http(String),

    #[error("transport rejected the message: {0}")]
    Rejected(String),
}
