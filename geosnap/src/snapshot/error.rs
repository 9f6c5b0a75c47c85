//! Snapshot acquisition errors.

use thiserror::Error;

use crate::location::PositionError;

/// Why a refresh did not produce a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Location access was refused. The caller should ask for authorization.
    #[error("Permission denied")]
    PermissionDenied,

    /// No usable position could be obtained.
    #[error("Location unavailable")]
    LocationUnavailable,

    /// Any other failure while resolving the position.
    #[error("{0}")]
    Unknown(String),
}

impl SnapshotError {
    /// True only for [`SnapshotError::PermissionDenied`].
    pub fn requires_permission(&self) -> bool {
        matches!(self, SnapshotError::PermissionDenied)
    }
}

impl From<PositionError> for SnapshotError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::PermissionDenied => SnapshotError::PermissionDenied,
            PositionError::Unavailable(reason) => SnapshotError::Unknown(reason),
        }
    }
}
