//! JSON file-backed record store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::{debug, info};

use super::error::StoreError;
use super::memory::RecordTable;
use super::record::{LoggedRecord, NewRecord, RecordId};
use super::RecordStore;

/// Record store persisted as a JSON array.
///
/// The whole list is rewritten on every change. A write goes to a sibling
/// temporary file which is then renamed over the target, and the in-memory
/// view only changes once the write has succeeded.
pub struct JsonFileRecordStore {
    path: PathBuf,
    table: Mutex<RecordTable>,
}

impl JsonFileRecordStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = read_records(&path)?;
        info!(path = %path.display(), records = records.len(), "Opened record store");

        Ok(Self {
            path,
            table: Mutex::new(RecordTable::new(records)),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn table(&self) -> MutexGuard<'_, RecordTable> {
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RecordStore for JsonFileRecordStore {
    fn insert(&self, record: NewRecord) -> Result<RecordId, StoreError> {
        let mut table = self.table();

        let mut candidate = table.records().to_vec();
        candidate.push(record.clone().into_record(table.next_id()));
        write_records(&self.path, &candidate)?;

        let stored = table.insert(record);
        debug!(id = stored.id, name = %stored.name, "Record saved");
        Ok(stored.id)
    }

    fn get_all(&self) -> watch::Receiver<Vec<LoggedRecord>> {
        self.table().subscribe()
    }

    fn delete(&self, record: &LoggedRecord) -> Result<usize, StoreError> {
        let mut table = self.table();

        let candidate: Vec<LoggedRecord> = table
            .records()
            .iter()
            .filter(|r| r.id != record.id)
            .cloned()
            .collect();
        if candidate.len() == table.records().len() {
            return Ok(0);
        }
        write_records(&self.path, &candidate)?;

        debug!(id = record.id, "Record deleted");
        Ok(table.delete(record.id))
    }

    fn get_by_id(&self, id: RecordId) -> Result<Option<LoggedRecord>, StoreError> {
        Ok(self.table().get(id))
    }
}

fn read_records(path: &Path) -> Result<Vec<LoggedRecord>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&contents)?)
}

fn write_records(path: &Path, records: &[LoggedRecord]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
