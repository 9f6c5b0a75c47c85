//! Snapshot acquisition.
//!
//! [`AcquisitionCoordinator`] resolves a position, then looks up terrain
//! elevation and reads barometric pressure concurrently, publishing each
//! partial result as a new [`GeoSnapshot`] the moment it arrives.

mod coordinator;
mod error;
mod state;

pub use coordinator::AcquisitionCoordinator;
pub use error::SnapshotError;
pub use state::{GeoSnapshot, SnapshotUpdate, UNAVAILABLE};
