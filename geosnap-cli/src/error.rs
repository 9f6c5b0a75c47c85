//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use geosnap::config::{config_file_path, ConfigFileError};
use geosnap::elevation::ElevationError;
use geosnap::snapshot::SnapshotError;
use geosnap::store::{RecordId, StoreError};

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to create the elevation client
    ElevationClient(ElevationError),
    /// Record store could not be read or written
    Store { path: PathBuf, error: StoreError },
    /// The position step of a snapshot failed
    Snapshot(SnapshotError),
    /// No saved record with this id
    RecordNotFound(RecordId),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Snapshot(SnapshotError::PermissionDenied) => {
                eprintln!();
                eprintln!("Location access was refused. Grant location permission and retry.");
            }
            CliError::Snapshot(SnapshotError::LocationUnavailable) => {
                eprintln!();
                eprintln!("No position could be obtained. Check --lat/--lon and try again.");
            }
            CliError::Store { path, .. } => {
                eprintln!();
                eprintln!("Records file: {}", path.display());
                eprintln!("Change it with: geosnap config set storage.records_file <path>");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Config file: {}", config_file_path().display());
                eprintln!("Use 'geosnap config list' to see available keys.");
            }
            CliError::RecordNotFound(_) => {
                eprintln!();
                eprintln!("Use 'geosnap log list' to see saved records.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::ElevationClient(e) => write!(f, "Failed to create elevation client: {}", e),
            CliError::Store { error, .. } => write!(f, "Record store error: {}", error),
            CliError::Snapshot(e) => write!(f, "Snapshot failed: {}", e),
            CliError::RecordNotFound(id) => write!(f, "No saved record with id {}", id),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::ElevationClient(e) => Some(e),
            CliError::Store { error, .. } => Some(error),
            CliError::Snapshot(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<SnapshotError> for CliError {
    fn from(e: SnapshotError) -> Self {
        CliError::Snapshot(e)
    }
}
