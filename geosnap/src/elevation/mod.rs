//! Terrain elevation lookup with a quantized LRU cache.
//!
//! # Architecture
//!
//! ```text
//! ElevationCache (grid key → value | cached failure, LRU bounded)
//!     │
//!     └── ElevationClient trait → OpenElevationClient (reqwest, 5s timeout)
//! ```
//!
//! Coordinates are floored to a 0.001° grid (~100 m); all lookups inside one
//! cell share a single entry. Failures are cached as explicit "no value"
//! entries so a failing cell is never retried while it stays cached.

mod cache;
mod client;
mod config;
mod error;
mod key;

pub use cache::{ElevationCache, ElevationCacheStats};
pub use client::{ElevationClient, OpenElevationClient};
pub use config::{
    ElevationConfig, CACHE_GRID_DEGREES, DEFAULT_CACHE_CAPACITY, DEFAULT_ELEVATION_ENDPOINT,
    DEFAULT_ELEVATION_TIMEOUT_MS,
};
pub use error::ElevationError;
pub use key::CacheKey;
