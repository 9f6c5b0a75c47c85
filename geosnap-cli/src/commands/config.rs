//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list` and `config path`
//! for viewing and modifying settings from the command line.

use clap::Subcommand;
use geosnap::config::{config_file_path, ConfigFile, ConfigKey};
use geosnap::navigation::Screen;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., elevation.endpoint)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., elevation.endpoint)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key),
        ConfigCommands::Set { key, value } => run_set(&key, &value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'geosnap config list' to see available keys.",
            key
        ))
    })
}

/// Print one value, or `(not set)` when empty.
fn run_get(key: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let config = ConfigFile::load()?;
    println!("{}", display_value(&config_key.get(&config)));
    Ok(())
}

/// Validate, store and echo a value along with the one it replaced.
fn run_set(key: &str, value: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;

    let mut config = ConfigFile::load()?;
    let previous = config_key.get(&config);
    config_key
        .set(&mut config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    config.save()?;

    let current = config_key.get(&config);
    if previous == current {
        println!("Set {} = {} (unchanged)", config_key.name(), current);
    } else {
        println!(
            "Set {} = {} (was {})",
            config_key.name(),
            current,
            display_value(&previous)
        );
    }

    Ok(())
}

/// Print every key grouped by section, marking values that differ from
/// the built-in defaults.
fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let defaults = ConfigFile::default();

    let title = Screen::Settings.title();
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));

    let mut section = "";
    for key in ConfigKey::all() {
        if key.section() != section {
            section = key.section();
            println!();
            println!("[{}]", section);
        }

        let value = key.get(&config);
        let default = key.get(&defaults);
        if value == default {
            println!("  {} = {}", key.key_name(), display_value(&value));
        } else {
            println!(
                "  {} = {}  (default: {})",
                key.key_name(),
                display_value(&value),
                display_value(&default)
            );
        }
    }

    Ok(())
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}
