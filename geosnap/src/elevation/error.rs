//! Error types for remote elevation lookups.

use thiserror::Error;

/// Errors that can occur when querying the elevation service.
///
/// These never escape the [`ElevationCache`](super::ElevationCache): every
/// variant collapses to an absent value there and is cached as a failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ElevationError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The service answered with a non-200 status.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The response body is not valid JSON.
    #[error("Failed to parse response: {0}")]
    Json(String),

    /// The response has no usable `results[0].elevation` number.
    #[error("Response has no elevation value")]
    MissingElevation,
}
