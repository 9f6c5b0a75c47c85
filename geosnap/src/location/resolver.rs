//! Two-tier position resolution.
//!
//! A recent cached fix is preferred over a fresh acquisition. Fixes older than
//! the freshness window are never returned from the fast path.

use std::time::Duration;

use tracing::{debug, trace, warn};

use super::fix::GeoFix;
use super::provider::{PositionError, PositionProvider};

/// Default freshness window for the fast path (60 seconds).
pub const DEFAULT_FRESHNESS_MS: u64 = 60_000;

/// Configuration for the location resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationResolverConfig {
    /// Maximum age of a last known fix that is still returned directly.
    ///
    /// Also passed to the provider as the max-age hint of a fresh request.
    pub freshness: Duration,
}

impl Default for LocationResolverConfig {
    fn default() -> Self {
        Self {
            freshness: Duration::from_millis(DEFAULT_FRESHNESS_MS),
        }
    }
}

/// Resolves the current position from a [`PositionProvider`].
pub struct LocationResolver<P: PositionProvider> {
    provider: P,
    config: LocationResolverConfig,
}

impl<P: PositionProvider> LocationResolver<P> {
    /// Create a resolver with the default freshness window.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, LocationResolverConfig::default())
    }

    /// Create a resolver with custom configuration.
    pub fn with_config(provider: P, config: LocationResolverConfig) -> Self {
        Self { provider, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LocationResolverConfig {
        &self.config
    }

    /// Resolve the current position.
    ///
    /// Returns `Ok(None)` when no position could be obtained for ordinary
    /// reasons. The only error ever returned is
    /// [`PositionError::PermissionDenied`].
    pub async fn resolve(&self) -> Result<Option<GeoFix>, PositionError> {
        let freshness_ms = self.config.freshness.as_millis() as u64;

        match self.provider.last_known_fix().await {
            Ok(Some(fix)) if fix.age_millis <= freshness_ms => {
                trace!(
                    age_ms = fix.age_millis,
                    freshness_ms,
                    "Using last known fix"
                );
                return Ok(Some(fix));
            }
            Ok(Some(fix)) => {
                debug!(
                    age_ms = fix.age_millis,
                    freshness_ms, "Last known fix too old, requesting fresh fix"
                );
            }
            Ok(None) => {
                debug!("No last known fix, requesting fresh fix");
            }
            Err(PositionError::PermissionDenied) => return Err(PositionError::PermissionDenied),
            Err(PositionError::Unavailable(reason)) => {
                debug!(reason = %reason, "Last known fix unavailable");
            }
        }

        match self.provider.current_fix(self.config.freshness).await {
            Ok(fix) => {
                if fix.is_none() {
                    debug!("Provider returned no fresh fix");
                }
                Ok(fix)
            }
            Err(PositionError::PermissionDenied) => Err(PositionError::PermissionDenied),
            Err(PositionError::Unavailable(reason)) => {
                warn!(reason = %reason, "Fresh position request failed");
                Ok(None)
            }
        }
    }
}
