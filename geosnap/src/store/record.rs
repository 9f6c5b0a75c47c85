//! Persisted snapshot records.

use serde::{Deserialize, Serialize};

/// Identifier assigned by a [`RecordStore`](super::RecordStore) on insert.
pub type RecordId = i64;

/// A saved snapshot. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedRecord {
    pub id: RecordId,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Device altitude (m) reported with the fix.
    #[serde(default)]
    pub device_altitude: Option<f64>,
    /// Terrain elevation (m) from the elevation service.
    #[serde(default)]
    pub terrain_altitude: Option<f64>,
    /// Barometric pressure (hPa).
    #[serde(default)]
    pub pressure_hpa: Option<f64>,
    pub time_zone_id: String,
    /// Unix epoch milliseconds.
    pub recorded_at_millis: i64,
    #[serde(default)]
    pub note: String,
}

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub device_altitude: Option<f64>,
    pub terrain_altitude: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub time_zone_id: String,
    pub recorded_at_millis: i64,
    pub note: String,
}

impl NewRecord {
    /// Attach an id, producing the stored form.
    pub fn into_record(self, id: RecordId) -> LoggedRecord {
        LoggedRecord {
            id,
            name: self.name,
            longitude: self.longitude,
            latitude: self.latitude,
            device_altitude: self.device_altitude,
            terrain_altitude: self.terrain_altitude,
            pressure_hpa: self.pressure_hpa,
            time_zone_id: self.time_zone_id,
            recorded_at_millis: self.recorded_at_millis,
            note: self.note,
        }
    }
}
