//! Position fix value type.

use serde::{Deserialize, Serialize};

/// A single position measurement.
///
/// Fixes are immutable once produced. The `age_millis` field is the age of
/// the measurement at the moment it was handed out by the provider, which is
/// what the resolver uses to decide whether a cached fix is fresh enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,

    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,

    /// Altitude above sea level in meters, if the provider reports one.
    pub altitude: Option<f64>,

    /// Age of the measurement in milliseconds.
    pub age_millis: u64,

    /// Wall-clock capture time (Unix epoch milliseconds).
    pub captured_at_millis: i64,
}

impl GeoFix {
    /// Create a fix without altitude.
    pub fn new(latitude: f64, longitude: f64, age_millis: u64, captured_at_millis: i64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            age_millis,
            captured_at_millis,
        }
    }

    /// Attach a device altitude (meters).
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Returns true if the provider reported an altitude with this fix.
    #[inline]
    pub fn has_altitude(&self) -> bool {
        self.altitude.is_some()
    }

    /// Position as (lat, lon).
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_altitude() {
        let fix = GeoFix::new(31.2, 121.5, 0, 1_700_000_000_000);
        assert!(!fix.has_altitude());
        assert_eq!(fix.position(), (31.2, 121.5));
    }

    #[test]
    fn test_with_altitude() {
        let fix = GeoFix::new(31.2, 121.5, 0, 0).with_altitude(12.5);
        assert!(fix.has_altitude());
        assert_eq!(fix.altitude, Some(12.5));
    }
}
