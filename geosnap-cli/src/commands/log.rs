//! Record log commands - list, show and delete saved snapshots.

use clap::Subcommand;

use geosnap::clock::{Clock, SystemClock};
use geosnap::config::ConfigFile;
use geosnap::format::format_double;
use geosnap::navigation::Screen;
use geosnap::store::{JsonFileRecordStore, RecordId, RecordStore, StoreError};

use super::output::print_record;
use crate::error::CliError;

/// Log subcommands.
#[derive(Debug, Subcommand)]
pub enum LogAction {
    /// List saved records, newest first
    List,

    /// Show one saved record
    Show {
        /// Record id as printed by `geosnap log list`
        id: RecordId,
    },

    /// Delete a saved record
    Delete {
        /// Record id as printed by `geosnap log list`
        id: RecordId,
    },
}

/// Run a log subcommand.
pub fn run(action: LogAction) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let path = config.storage.records_file;
    let store = JsonFileRecordStore::open(&path).map_err(|error| CliError::Store {
        path: path.clone(),
        error,
    })?;

    let result = match action {
        LogAction::List => {
            list(&store);
            Ok(())
        }
        LogAction::Show { id } => show(&store, id),
        LogAction::Delete { id } => delete(&store, id),
    };

    result.map_err(|e| match e {
        LogError::Store(error) => CliError::Store { path, error },
        LogError::NotFound(id) => CliError::RecordNotFound(id),
    })
}

enum LogError {
    Store(StoreError),
    NotFound(RecordId),
}

impl From<StoreError> for LogError {
    fn from(e: StoreError) -> Self {
        LogError::Store(e)
    }
}

fn list(store: &JsonFileRecordStore) {
    let records = store.get_all().borrow().clone();
    let clock = SystemClock;

    let title = Screen::Log.title();
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();

    if records.is_empty() {
        println!("No saved records.");
        println!("Save one with: geosnap snapshot --lat <LAT> --lon <LON> --save <NAME>");
        return;
    }

    for record in &records {
        println!(
            "  #{:<4} {:<20} {}  ({}, {})",
            record.id,
            record.name,
            clock.format_local(record.recorded_at_millis),
            format_double(record.latitude),
            format_double(record.longitude),
        );
    }
    println!();
    println!("{} record(s)", records.len());
}

fn show(store: &JsonFileRecordStore, id: RecordId) -> Result<(), LogError> {
    let record = store.get_by_id(id)?.ok_or(LogError::NotFound(id))?;
    let recorded_at = SystemClock.format_local(record.recorded_at_millis);
    let screen = Screen::LogDetail(record.clone());

    let title = screen.title();
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();
    print_record(&record, &recorded_at);

    if screen.back() == Screen::Log {
        println!();
        println!("Back: geosnap log list");
    }
    Ok(())
}

fn delete(store: &JsonFileRecordStore, id: RecordId) -> Result<(), LogError> {
    let record = store.get_by_id(id)?.ok_or(LogError::NotFound(id))?;
    let removed = store.delete(&record)?;
    tracing::info!(id, removed, "Record deleted");
    println!("Deleted record #{}: {}", record.id, record.name);
    Ok(())
}
