//! Grid quantization of coordinates into cache keys.

use std::fmt;

use super::config::CACHE_GRID_DEGREES;

/// Cache key identifying one grid cell.
///
/// Built by flooring each coordinate to [`CACHE_GRID_DEGREES`]. The cell
/// indices are stored instead of the floored degrees so that equality never
/// depends on floating point representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// `floor(latitude / grid)`
    pub lat_cell: i64,
    /// `floor(longitude / grid)`
    pub lon_cell: i64,
}

impl CacheKey {
    /// Quantize a coordinate to its grid cell.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            lat_cell: quantize(latitude),
            lon_cell: quantize(longitude),
        }
    }

    /// South-west corner of the cell in degrees.
    pub fn origin(&self) -> (f64, f64) {
        (
            self.lat_cell as f64 * CACHE_GRID_DEGREES,
            self.lon_cell as f64 * CACHE_GRID_DEGREES,
        )
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lat, lon) = self.origin();
        write!(f, "{:.3}_{:.3}", lat, lon)
    }
}

#[inline]
fn quantize(value: f64) -> i64 {
    (value / CACHE_GRID_DEGREES).floor() as i64
}
