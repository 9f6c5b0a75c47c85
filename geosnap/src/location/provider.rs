//! Position provider capability.
//!
//! The [`PositionProvider`] trait is the narrow seam between the resolver and
//! whatever actually produces positions (a platform location service, a GNSS
//! daemon, a fixed coordinate from the command line).

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use super::fix::GeoFix;

/// Errors a position provider may report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    /// Authorization for position access is missing.
    #[error("Position access denied")]
    PermissionDenied,

    /// The provider failed for an ordinary reason (no signal, service down).
    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Trait for sources of position fixes.
pub trait PositionProvider: Send + Sync {
    /// Return the most recent fix the provider already holds, if any.
    ///
    /// Must not activate positioning hardware.
    fn last_known_fix(&self) -> impl Future<Output = Result<Option<GeoFix>, PositionError>> + Send;

    /// Acquire a fresh high-accuracy fix.
    ///
    /// The provider may satisfy the request with a cached fix no older than
    /// `max_age`. Dropping the returned future abandons the request.
    fn current_fix(
        &self,
        max_age: Duration,
    ) -> impl Future<Output = Result<Option<GeoFix>, PositionError>> + Send;
}

/// Provider that always reports one configured coordinate.
///
/// The coordinate is handed out as a zero-age last known fix, so the resolver
/// always takes the fast path.
#[derive(Debug, Clone)]
pub struct FixedPositionProvider {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

impl FixedPositionProvider {
    /// Create a provider for the given coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    /// Report the given device altitude (meters) with every fix.
    pub fn with_altitude(mut self, altitude: Option<f64>) -> Self {
        self.altitude = altitude;
        self
    }

    fn fix(&self) -> GeoFix {
        GeoFix {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            age_millis: 0,
            captured_at_millis: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl PositionProvider for FixedPositionProvider {
    async fn last_known_fix(&self) -> Result<Option<GeoFix>, PositionError> {
        Ok(Some(self.fix()))
    }

    async fn current_fix(&self, _max_age: Duration) -> Result<Option<GeoFix>, PositionError> {
        Ok(Some(self.fix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_provider_reports_coordinate() {
        let provider = FixedPositionProvider::new(43.6, 1.4).with_altitude(Some(150.0));

        let fix = provider.last_known_fix().await.unwrap().unwrap();
        assert_eq!(fix.position(), (43.6, 1.4));
        assert_eq!(fix.altitude, Some(150.0));
        assert_eq!(fix.age_millis, 0);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PositionError::PermissionDenied.to_string(),
            "Position access denied"
        );
        assert_eq!(
            PositionError::Unavailable("no signal".into()).to_string(),
            "Position unavailable: no signal"
        );
    }
}
