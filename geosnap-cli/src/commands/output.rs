//! Text rendering for snapshots and saved records.

use geosnap::format::format_double;
use geosnap::snapshot::{GeoSnapshot, UNAVAILABLE};
use geosnap::store::LoggedRecord;

/// Shown for a field that has not arrived yet.
const PENDING: &str = "(pending)";

/// Render a snapshot field, appending `unit` to numeric values.
pub fn field(value: &str, unit: &str) -> String {
    match value {
        "" => PENDING.to_string(),
        UNAVAILABLE => UNAVAILABLE.to_string(),
        _ if unit.is_empty() => value.to_string(),
        _ => format!("{} {}", value, unit),
    }
}

/// Render an optional stored measurement.
pub fn measurement(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", format_double(v), unit),
        None => UNAVAILABLE.to_string(),
    }
}

/// Print the fields of a snapshot, one per line.
pub fn print_snapshot(snapshot: &GeoSnapshot) {
    println!("  Latitude:          {}", field(&snapshot.latitude, ""));
    println!("  Longitude:         {}", field(&snapshot.longitude, ""));
    println!(
        "  Terrain elevation: {}",
        field(&snapshot.elevation_from_terrain, "m")
    );
    println!(
        "  Device altitude:   {}",
        field(&snapshot.elevation_from_device, "m")
    );
    println!("  Pressure:          {}", field(&snapshot.pressure_hpa, "hPa"));
    println!("  Time zone:         {}", field(&snapshot.time_zone_id, ""));
    println!(
        "  Local time:        {}",
        field(&snapshot.formatted_local_time, "")
    );
}

/// Print every field of a saved record.
pub fn print_record(record: &LoggedRecord, recorded_at: &str) {
    println!("  Latitude:          {}", format_double(record.latitude));
    println!("  Longitude:         {}", format_double(record.longitude));
    println!(
        "  Terrain elevation: {}",
        measurement(record.terrain_altitude, "m")
    );
    println!(
        "  Device altitude:   {}",
        measurement(record.device_altitude, "m")
    );
    println!("  Pressure:          {}", measurement(record.pressure_hpa, "hPa"));
    println!("  Time zone:         {}", record.time_zone_id);
    println!("  Recorded at:       {}", recorded_at);
    if !record.note.is_empty() {
        println!("  Note:              {}", record.note);
    }
}
