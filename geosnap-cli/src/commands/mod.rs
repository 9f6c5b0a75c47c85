//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`snapshot`] - Take a snapshot and optionally save it
//! - [`log`] - Saved record management (list, show, delete)
//! - [`config`] - Configuration management (get, set, list, path)

pub mod config;
pub mod log;
mod output;
pub mod snapshot;
