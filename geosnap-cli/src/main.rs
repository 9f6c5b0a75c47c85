//! geosnap CLI - Command-line interface
//!
//! Takes position snapshots with terrain elevation, barometric pressure and
//! local time, and manages the saved record log.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use geosnap::logging::{default_log_dir, default_log_file, init_logging};

use commands::config::ConfigCommands;
use commands::log::LogAction;
use commands::snapshot::SnapshotArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "geosnap")]
#[command(version = geosnap::VERSION)]
#[command(about = "Position, terrain elevation and pressure snapshots", long_about = None)]
struct Cli {
    /// Print debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Take a snapshot at a position
    Snapshot(SnapshotArgs),

    /// Manage saved records
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let _logging_guard = match init_logging(&default_log_dir(), default_log_file(), cli.verbose)
    {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    tracing::debug!(version = geosnap::VERSION, "geosnap starting");

    let result = match cli.command {
        Command::Snapshot(args) => commands::snapshot::run(args),
        Command::Log { action } => commands::log::run(action),
        Command::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
