//! geosnap - position, terrain elevation and barometric pressure snapshots.
//!
//! One refresh resolves the current position, then looks up terrain
//! elevation and reads the barometer concurrently. Each result is published
//! the moment it arrives, and a finished snapshot can be saved to a local
//! record store.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use geosnap::clock::SystemClock;
//! use geosnap::elevation::{ElevationCache, ElevationConfig, OpenElevationClient};
//! use geosnap::location::{FixedPositionProvider, LocationResolver};
//! use geosnap::pressure::{PressureReader, SensorHub};
//! use geosnap::snapshot::AcquisitionCoordinator;
//! use geosnap::store::MemoryRecordStore;
//!
//! let config = ElevationConfig::default();
//! let client = OpenElevationClient::new(&config)?;
//! let coordinator = AcquisitionCoordinator::new(
//!     LocationResolver::new(FixedPositionProvider::new(31.2, 121.5)),
//!     Arc::new(ElevationCache::from_config(client, &config)),
//!     PressureReader::new(Arc::new(SensorHub::unavailable())),
//!     Arc::new(MemoryRecordStore::new()),
//!     Arc::new(SystemClock),
//! );
//!
//! coordinator.refresh().await?;
//! let snapshot = coordinator.wait_until_settled().await;
//! ```

pub mod clock;
pub mod config;
pub mod elevation;
pub mod format;
pub mod location;
pub mod logging;
pub mod navigation;
pub mod pressure;
pub mod snapshot;
pub mod store;

/// Version of the geosnap library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
