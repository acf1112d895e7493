//! Error types surfaced by the record store.

use thiserror::Error;

/// Failures raised while touching the on-disk database.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying SQLite access failed (disk, corruption, connection).
    #[error("storage fault: {0}")]
    StorageFault(#[from] rusqlite::Error),

    /// The data directory could not be prepared.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the `db` module.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
