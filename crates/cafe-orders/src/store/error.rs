//! Error type for the backing store.

use thiserror::Error;

/// Any failure of the store itself, as opposed to a rejected request.
///
/// These are logged with full detail and answered with a generic message.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The in-memory actors have shut down or dropped a reply.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored value could not be decoded (bad decimal, status or timestamp).
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("store connection poisoned")]
    Poisoned,

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
