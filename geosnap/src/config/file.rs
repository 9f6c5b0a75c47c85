//! Configuration file handling for ~/.geosnap/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], defaults in
//! [`super::defaults`], parsing in [`super::parser`], and serialization in
//! [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::elevation::ElevationConfig;
use crate::location::LocationResolverConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.geosnap/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.geosnap/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Resolver settings derived from `[location]`.
    pub fn location_config(&self) -> LocationResolverConfig {
        LocationResolverConfig {
            freshness: Duration::from_millis(self.location.freshness_ms),
        }
    }

    /// Client and cache settings derived from `[elevation]`.
    pub fn elevation_config(&self) -> ElevationConfig {
        ElevationConfig::default()
            .with_endpoint(self.elevation.endpoint.clone())
            .with_timeout(Duration::from_millis(self.elevation.timeout_ms))
            .with_capacity(self.elevation.cache_capacity)
    }

    /// Barometer sampling interval from `[pressure]`.
    pub fn pressure_poll_interval(&self) -> Duration {
        Duration::from_millis(self.pressure.poll_interval_ms)
    }
}

/// Get the path to the config directory (~/.geosnap).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geosnap")
}

/// Get the path to the config file (~/.geosnap/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.general.language, Language::System);
        assert_eq!(config.location.freshness_ms, 60_000);
        assert_eq!(config.elevation.cache_capacity, 300);
        assert_eq!(config.pressure.poll_interval_ms, 200);
        assert!(config.storage.records_file.ends_with("records.json"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.location.freshness_ms = 1_500;
        config.elevation.endpoint = "http://localhost:9000/lookup".to_string();
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_conversions() {
        let mut config = ConfigFile::default();
        config.location.freshness_ms = 30_000;
        config.elevation.timeout_ms = 2_000;
        config.elevation.cache_capacity = 64;

        assert_eq!(config.location_config().freshness, Duration::from_secs(30));

        let elevation = config.elevation_config();
        assert_eq!(elevation.timeout, Duration::from_secs(2));
        assert_eq!(elevation.capacity, 64);
        assert_eq!(elevation.endpoint, config.elevation.endpoint);

        assert_eq!(config.pressure_poll_interval(), Duration::from_millis(200));
    }
}
