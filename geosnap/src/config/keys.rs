//! Configuration key access and validation.
//!
//! This module provides a type-safe interface for getting and setting
//! configuration values by key name. Parsing the INI file goes through the
//! same [`ConfigKey::set`] path, so a value accepted by `geosnap config set`
//! is exactly a value accepted in config.ini.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use super::settings::ConfigFile;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to a specific field in [`ConfigFile`] and knows how to
/// get and set its value with proper validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    GeneralLanguage,

    LocationFreshnessMs,

    ElevationEndpoint,
    ElevationTimeoutMs,
    ElevationCacheCapacity,

    PressureSysfsRoot,
    PressurePollIntervalMs,

    StorageRecordsFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "elevation.endpoint").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::GeneralLanguage => "general.language",
            ConfigKey::LocationFreshnessMs => "location.freshness_ms",
            ConfigKey::ElevationEndpoint => "elevation.endpoint",
            ConfigKey::ElevationTimeoutMs => "elevation.timeout_ms",
            ConfigKey::ElevationCacheCapacity => "elevation.cache_capacity",
            ConfigKey::PressureSysfsRoot => "pressure.sysfs_root",
            ConfigKey::PressurePollIntervalMs => "pressure.poll_interval_ms",
            ConfigKey::StorageRecordsFile => "storage.records_file",
        }
    }

    /// Get the section name (e.g., "elevation").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "endpoint").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::GeneralLanguage => config.general.language.to_string(),
            ConfigKey::LocationFreshnessMs => config.location.freshness_ms.to_string(),
            ConfigKey::ElevationEndpoint => config.elevation.endpoint.clone(),
            ConfigKey::ElevationTimeoutMs => config.elevation.timeout_ms.to_string(),
            ConfigKey::ElevationCacheCapacity => config.elevation.cache_capacity.to_string(),
            ConfigKey::PressureSysfsRoot => path_to_display(&config.pressure.sysfs_root),
            ConfigKey::PressurePollIntervalMs => config.pressure.poll_interval_ms.to_string(),
            ConfigKey::StorageRecordsFile => path_to_display(&config.storage.records_file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before setting.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        let value = value.trim();

        match self {
            ConfigKey::GeneralLanguage => config.general.language = self.parse(value)?,
            ConfigKey::LocationFreshnessMs => config.location.freshness_ms = self.parse(value)?,
            ConfigKey::ElevationEndpoint => config.elevation.endpoint = value.to_string(),
            ConfigKey::ElevationTimeoutMs => config.elevation.timeout_ms = self.parse(value)?,
            ConfigKey::ElevationCacheCapacity => {
                config.elevation.cache_capacity = self.parse(value)?
            }
            ConfigKey::PressureSysfsRoot => config.pressure.sysfs_root = expand_tilde(value),
            ConfigKey::PressurePollIntervalMs => {
                config.pressure.poll_interval_ms = self.parse(value)?
            }
            ConfigKey::StorageRecordsFile => config.storage.records_file = expand_tilde(value),
        }
        Ok(())
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    /// Get the validation specification for this key.
    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::GeneralLanguage => Box::new(OneOfSpec::new(&["system", "zh", "en"])),
            ConfigKey::LocationFreshnessMs => Box::new(IntegerSpec),
            ConfigKey::ElevationEndpoint => Box::new(UrlSpec),
            ConfigKey::ElevationTimeoutMs => Box::new(PositiveIntegerSpec),
            ConfigKey::ElevationCacheCapacity => Box::new(PositiveIntegerSpec),
            ConfigKey::PressureSysfsRoot => Box::new(PathSpec),
            ConfigKey::PressurePollIntervalMs => Box::new(PositiveIntegerSpec),
            ConfigKey::StorageRecordsFile => Box::new(PathSpec),
        }
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, ConfigKeyError> {
        value.parse().map_err(|_| ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason: format!("cannot parse '{}'", value),
        })
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::GeneralLanguage,
            ConfigKey::LocationFreshnessMs,
            ConfigKey::ElevationEndpoint,
            ConfigKey::ElevationTimeoutMs,
            ConfigKey::ElevationCacheCapacity,
            ConfigKey::PressureSysfsRoot,
            ConfigKey::PressurePollIntervalMs,
            ConfigKey::StorageRecordsFile,
        ]
    }
}

// ============================================================================
// Value Specifications
// ============================================================================

/// Trait for value validation specifications.
trait ValueSpecification {
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Value must be one of a set of options (case-insensitive).
struct OneOfSpec {
    options: &'static [&'static str],
}

impl OneOfSpec {
    fn new(options: &'static [&'static str]) -> Self {
        Self { options }
    }
}

impl ValueSpecification for OneOfSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let lower = value.to_lowercase();
        if self.options.iter().any(|opt| *opt == lower) {
            Ok(())
        } else {
            Err(format!("must be one of: {}", self.options.join(", ")))
        }
    }
}

/// Non-negative integer.
struct IntegerSpec;

impl ValueSpecification for IntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        value
            .parse::<u64>()
            .map(|_| ())
            .map_err(|_| "must be a non-negative integer".to_string())
    }
}

/// Integer greater than zero.
struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

/// Non-empty path.
struct PathSpec;

impl ValueSpecification for PathSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("must be a valid path".to_string())
        } else {
            Ok(())
        }
    }
}

/// HTTP(S) URL.
struct UrlSpec;

impl ValueSpecification for UrlSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err("must be a URL starting with 'http://' or 'https://'".to_string())
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Convert path to display string, collapsing home dir to ~.
pub(super) fn path_to_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "elevation.endpoint".parse::<ConfigKey>().unwrap(),
            ConfigKey::ElevationEndpoint
        );
        // Case insensitive
        assert_eq!(
            "GENERAL.LANGUAGE".parse::<ConfigKey>().unwrap(),
            ConfigKey::GeneralLanguage
        );
        assert!("invalid.key".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_key_name_parts() {
        assert_eq!(ConfigKey::ElevationCacheCapacity.section(), "elevation");
        assert_eq!(ConfigKey::ElevationCacheCapacity.key_name(), "cache_capacity");
        assert_eq!(ConfigKey::StorageRecordsFile.section(), "storage");
    }

    #[test]
    fn test_get_value() {
        let config = ConfigFile::default();

        assert_eq!(ConfigKey::GeneralLanguage.get(&config), "system");
        assert_eq!(ConfigKey::LocationFreshnessMs.get(&config), "60000");
        assert_eq!(ConfigKey::ElevationTimeoutMs.get(&config), "5000");
        assert_eq!(ConfigKey::ElevationCacheCapacity.get(&config), "300");
        assert_eq!(ConfigKey::PressureSysfsRoot.get(&config), "/sys/bus/iio/devices");
    }

    #[test]
    fn test_set_value() {
        let mut config = ConfigFile::default();

        ConfigKey::GeneralLanguage.set(&mut config, "zh").unwrap();
        assert_eq!(config.general.language, Language::Chinese);

        ConfigKey::ElevationCacheCapacity
            .set(&mut config, " 50 ")
            .unwrap();
        assert_eq!(config.elevation.cache_capacity, 50);

        ConfigKey::LocationFreshnessMs.set(&mut config, "0").unwrap();
        assert_eq!(config.location.freshness_ms, 0);

        ConfigKey::ElevationEndpoint
            .set(&mut config, "http://localhost:8080/lookup")
            .unwrap();
        assert_eq!(config.elevation.endpoint, "http://localhost:8080/lookup");
    }

    #[test]
    fn test_set_invalid_value_fails() {
        let mut config = ConfigFile::default();

        assert!(ConfigKey::GeneralLanguage.set(&mut config, "fr").is_err());
        assert!(ConfigKey::ElevationTimeoutMs.set(&mut config, "0").is_err());
        assert!(ConfigKey::ElevationTimeoutMs.set(&mut config, "-5").is_err());
        assert!(ConfigKey::ElevationEndpoint.set(&mut config, "ftp://x").is_err());
        assert!(ConfigKey::StorageRecordsFile.set(&mut config, "  ").is_err());

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_tilde_expansion_round_trips() {
        let mut config = ConfigFile::default();
        ConfigKey::StorageRecordsFile
            .set(&mut config, "~/geo/records.json")
            .unwrap();

        if dirs::home_dir().is_some() {
            assert!(!config.storage.records_file.starts_with("~"));
            assert_eq!(
                ConfigKey::StorageRecordsFile.get(&config),
                "~/geo/records.json"
            );
        }
    }

    #[test]
    fn test_all_keys() {
        let keys = ConfigKey::all();
        assert_eq!(keys.len(), 8);
        for key in keys {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }
}
