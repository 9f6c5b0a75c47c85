//! Configuration for the elevation lookup.

use std::time::Duration;

/// Default Open-Elevation lookup endpoint.
pub const DEFAULT_ELEVATION_ENDPOINT: &str = "https://api.open-elevation.com/api/v1/lookup";

/// Default request timeout (5 seconds).
pub const DEFAULT_ELEVATION_TIMEOUT_MS: u64 = 5_000;

/// Default maximum number of cached grid cells.
pub const DEFAULT_CACHE_CAPACITY: usize = 300;

/// Grid resolution used to quantize coordinates into cache cells (~100 m).
pub const CACHE_GRID_DEGREES: f64 = 0.001;

/// Configuration for the elevation client and cache.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationConfig {
    /// Lookup endpoint (queried with `?locations=<lat>,<lon>`).
    pub endpoint: String,

    /// Timeout applied to each HTTP request.
    pub timeout: Duration,

    /// Maximum number of cached grid cells.
    pub capacity: usize,
}

impl ElevationConfig {
    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the cache capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ELEVATION_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_ELEVATION_TIMEOUT_MS),
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
