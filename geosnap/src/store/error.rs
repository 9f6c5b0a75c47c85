//! Record store errors.

use thiserror::Error;

/// Errors raised by record stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Record store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a valid record list.
    #[error("Record store is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}
