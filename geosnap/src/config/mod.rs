//! Configuration for geosnap.
//!
//! User settings are stored in `~/.geosnap/config.ini`:
//!
//! - [`ConfigFile`] - All sections, loaded over defaults
//! - [`ConfigKey`] - Get/set a single value by `section.key` name
//!
//! Components keep their own config types ([`crate::elevation::ElevationConfig`],
//! [`crate::location::LocationResolverConfig`]); `ConfigFile` converts into them.

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::{default_records_file, DEFAULT_RECORDS_FILE_NAME};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    ConfigFile, ElevationSettings, GeneralSettings, Language, LocationSettings, PressureSettings,
    StorageSettings,
};
