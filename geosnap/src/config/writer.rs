//! INI serialization logic for converting `ConfigFile` → INI string.

use super::keys::path_to_display;
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[general]
; Display language: system (follow the OS locale), zh or en
language = {}

[location]
; A cached fix no older than this (milliseconds) is used without
; requesting a new one (default: 60000)
freshness_ms = {}

[elevation]
; Open-Elevation compatible lookup endpoint
endpoint = {}
; Request timeout in milliseconds (default: 5000)
timeout_ms = {}
; Number of ~100 m grid cells kept in the elevation cache (default: 300)
cache_capacity = {}

[pressure]
; Linux IIO device tree searched for a barometer
sysfs_root = {}
; Sampling interval in milliseconds (default: 200)
poll_interval_ms = {}

[storage]
; JSON file holding saved snapshots
records_file = {}
"#,
        config.general.language,
        config.location.freshness_ms,
        config.elevation.endpoint,
        config.elevation.timeout_ms,
        config.elevation.cache_capacity,
        path_to_display(&config.pressure.sysfs_root),
        config.pressure.poll_interval_ms,
        path_to_display(&config.storage.records_file),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use ini::Ini;

    #[test]
    fn test_written_config_parses_back() {
        let mut config = ConfigFile::default();
        config.general.language = Language::Chinese;
        config.elevation.cache_capacity = 12;
        config.pressure.poll_interval_ms = 50;

        let text = to_config_string(&config);
        let ini = Ini::load_from_str(&text).unwrap();
        let parsed = super::super::parser::parse_ini(&ini).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_sections_present() {
        let text = to_config_string(&ConfigFile::default());
        for section in ["[general]", "[location]", "[elevation]", "[pressure]", "[storage]"] {
            assert!(text.contains(section), "missing {section}");
        }
    }
}
