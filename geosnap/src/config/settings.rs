//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// General settings
    pub general: GeneralSettings,
    /// Position resolution settings
    pub location: LocationSettings,
    /// Terrain elevation lookup settings
    pub elevation: ElevationSettings,
    /// Barometer settings
    pub pressure: PressureSettings,
    /// Saved record storage
    pub storage: StorageSettings,
}

/// General configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralSettings {
    /// Display language.
    pub language: Language,
}

/// Position resolution configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSettings {
    /// Maximum age in milliseconds of a cached fix that is used directly.
    pub freshness_ms: u64,
}

/// Elevation lookup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationSettings {
    /// Lookup endpoint URL.
    pub endpoint: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of cached grid cells.
    pub cache_capacity: usize,
}

/// Barometer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureSettings {
    /// Root of the IIO device tree.
    pub sysfs_root: PathBuf,
    /// Sampling interval in milliseconds.
    pub poll_interval_ms: u64,
}

/// Record storage configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageSettings {
    /// JSON file holding saved records.
    pub records_file: PathBuf,
}

/// Display language preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Follow the system locale.
    #[default]
    System,
    /// Simplified Chinese.
    Chinese,
    English,
}

impl Language {
    /// Value as written in config.ini.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::System => "system",
            Language::Chinese => "zh",
            Language::English => "en",
        }
    }

    /// Locale to apply, or `None` to follow the system.
    pub fn locale_tag(&self) -> Option<&'static str> {
        match self {
            Language::System => None,
            Language::Chinese => Some("zh-CN"),
            Language::English => Some("en"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(Language::System),
            "zh" => Ok(Language::Chinese),
            "en" => Ok(Language::English),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!("system".parse::<Language>().unwrap(), Language::System);
        assert_eq!("ZH".parse::<Language>().unwrap(), Language::Chinese);
        assert_eq!(" en ".parse::<Language>().unwrap(), Language::English);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_locale_tag() {
        assert_eq!(Language::System.locale_tag(), None);
        assert_eq!(Language::Chinese.locale_tag(), Some("zh-CN"));
        assert_eq!(Language::English.to_string(), "en");
    }
}
