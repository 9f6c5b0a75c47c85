//! INI parsing logic for converting `Ini` → `ConfigFile`.

use ini::Ini;

use super::file::ConfigFileError;
use super::keys::{ConfigKey, ConfigKeyError};
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the
/// INI. Unknown sections and keys are ignored; empty values keep the default.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    for key in ConfigKey::all() {
        let Some(value) = ini.get_from(Some(key.section()), key.key_name()) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }

        key.set(&mut config, value).map_err(|e| {
            let reason = match e {
                ConfigKeyError::ValidationFailed { reason, .. } => reason,
                other => other.to_string(),
            };
            ConfigFileError::InvalidValue {
                section: key.section().to_string(),
                key: key.key_name().to_string(),
                value: value.to_string(),
                reason,
            }
        })?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use std::path::PathBuf;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_is_default() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_values_overlay_defaults() {
        let config = parse(
            "[general]\nlanguage = en\n\n\
             [elevation]\ncache_capacity = 42\n\n\
             [pressure]\nsysfs_root = /tmp/iio\n",
        )
        .unwrap();

        assert_eq!(config.general.language, Language::English);
        assert_eq!(config.elevation.cache_capacity, 42);
        assert_eq!(config.elevation.timeout_ms, 5_000);
        assert_eq!(config.pressure.sysfs_root, PathBuf::from("/tmp/iio"));
        assert_eq!(config.location.freshness_ms, 60_000);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse("[location]\nfreshness_ms = 1000\nmystery = 1\n\n[other]\nx = y\n").unwrap();
        assert_eq!(config.location.freshness_ms, 1_000);
    }

    #[test]
    fn test_empty_value_keeps_default() {
        let config = parse("[storage]\nrecords_file =\n").unwrap();
        assert_eq!(config.storage.records_file, ConfigFile::default().storage.records_file);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let err = parse("[elevation]\ntimeout_ms = soon\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue {
                section,
                key,
                value,
                reason,
            } => {
                assert_eq!(section, "elevation");
                assert_eq!(key, "timeout_ms");
                assert_eq!(value, "soon");
                assert_eq!(reason, "must be a positive integer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
