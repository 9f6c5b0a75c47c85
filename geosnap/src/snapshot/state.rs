//! Snapshot state and its transitions.

use super::error::SnapshotError;
use crate::format::{format_double, format_float};
use crate::location::GeoFix;

/// Text shown for a field that was attempted but could not be obtained.
pub const UNAVAILABLE: &str = "N/A";

/// Everything the user sees about the current position.
///
/// Text fields are empty while a value is pending and [`UNAVAILABLE`] once it
/// is known not to be obtainable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoSnapshot {
    pub latitude: String,
    pub longitude: String,
    /// Terrain elevation looked up for the coordinate (m).
    pub elevation_from_terrain: String,
    /// Altitude reported with the fix (m).
    pub elevation_from_device: String,
    pub pressure_hpa: String,
    pub time_zone_id: String,
    pub formatted_local_time: String,
    pub loading: bool,
    pub error: Option<SnapshotError>,
    pub raw_fix: Option<GeoFix>,
}

/// A single state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotUpdate {
    /// A refresh started.
    Loading,

    /// The position step succeeded.
    PositionReady {
        fix: GeoFix,
        time_zone_id: String,
        formatted_local_time: String,
    },

    /// The position step failed.
    Failed(SnapshotError),

    /// Terrain elevation lookup finished.
    Elevation(Option<f64>),

    /// Pressure read finished.
    Pressure(Option<f32>),

    /// The user dismissed the error.
    ClearError,
}

impl GeoSnapshot {
    /// Return the state after `update`. Only the fields owned by the update change.
    pub fn apply(&self, update: SnapshotUpdate) -> GeoSnapshot {
        let mut next = self.clone();
        match update {
            SnapshotUpdate::Loading => {
                next.loading = true;
                next.error = None;
            }
            SnapshotUpdate::PositionReady {
                fix,
                time_zone_id,
                formatted_local_time,
            } => {
                next.loading = false;
                next.latitude = format_double(fix.latitude);
                next.longitude = format_double(fix.longitude);
                next.elevation_from_device = or_unavailable(fix.altitude.map(format_double));
                next.elevation_from_terrain = String::new();
                next.pressure_hpa = String::new();
                next.time_zone_id = time_zone_id;
                next.formatted_local_time = formatted_local_time;
                next.raw_fix = Some(fix);
            }
            SnapshotUpdate::Failed(error) => {
                next.loading = false;
                next.error = Some(error);
            }
            SnapshotUpdate::Elevation(elevation) => {
                next.elevation_from_terrain = or_unavailable(elevation.map(format_double));
            }
            SnapshotUpdate::Pressure(hpa) => {
                next.pressure_hpa = or_unavailable(hpa.map(format_float));
            }
            SnapshotUpdate::ClearError => {
                next.error = None;
            }
        }
        next
    }

    /// True once a refresh has nothing left in flight.
    ///
    /// That is: not loading, and either an error is set or both terrain
    /// elevation and pressure have arrived.
    pub fn is_settled(&self) -> bool {
        if self.loading {
            return false;
        }
        self.error.is_some()
            || (!self.elevation_from_terrain.is_empty() && !self.pressure_hpa.is_empty())
    }

    /// Terrain elevation as a number, if one was obtained.
    pub fn terrain_elevation(&self) -> Option<f64> {
        parse_known(&self.elevation_from_terrain)
    }

    /// Pressure as a number, if one was obtained.
    pub fn pressure(&self) -> Option<f64> {
        parse_known(&self.pressure_hpa)
    }
}

fn or_unavailable(text: Option<String>) -> String {
    text.unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Blank and [`UNAVAILABLE`] mean "no value", never zero.
fn parse_known(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text == UNAVAILABLE {
        return None;
    }
    text.parse().ok()
}
