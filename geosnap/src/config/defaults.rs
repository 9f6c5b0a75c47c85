//! Default values for all configuration settings.
//!
//! Component defaults live next to the components; this module wires them
//! into `ConfigFile::default()`.

use std::path::PathBuf;

use super::settings::*;
use crate::elevation::{DEFAULT_CACHE_CAPACITY, DEFAULT_ELEVATION_ENDPOINT, DEFAULT_ELEVATION_TIMEOUT_MS};
use crate::location::DEFAULT_FRESHNESS_MS;
use crate::pressure::{DEFAULT_IIO_ROOT, DEFAULT_POLL_INTERVAL_MS};

/// Name of the records file inside the config directory.
pub const DEFAULT_RECORDS_FILE_NAME: &str = "records.json";

/// Default records file (~/.geosnap/records.json).
pub fn default_records_file() -> PathBuf {
    super::file::config_directory().join(DEFAULT_RECORDS_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            general: GeneralSettings {
                language: Language::System,
            },
            location: LocationSettings {
                freshness_ms: DEFAULT_FRESHNESS_MS,
            },
            elevation: ElevationSettings {
                endpoint: DEFAULT_ELEVATION_ENDPOINT.to_string(),
                timeout_ms: DEFAULT_ELEVATION_TIMEOUT_MS,
                cache_capacity: DEFAULT_CACHE_CAPACITY,
            },
            pressure: PressureSettings {
                sysfs_root: PathBuf::from(DEFAULT_IIO_ROOT),
                poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            },
            storage: StorageSettings {
                records_file: default_records_file(),
            },
        }
    }
}
