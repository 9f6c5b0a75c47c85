//! In-memory record store.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

use super::error::StoreError;
use super::record::{LoggedRecord, NewRecord, RecordId};
use super::RecordStore;

/// Ordered record list with id allocation and a live view.
///
/// Shared by the in-memory and file-backed stores.
pub(super) struct RecordTable {
    records: Vec<LoggedRecord>,
    next_id: RecordId,
    live: watch::Sender<Vec<LoggedRecord>>,
}

impl RecordTable {
    pub(super) fn new(mut records: Vec<LoggedRecord>) -> Self {
        sort_newest_first(&mut records);
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let (live, _) = watch::channel(records.clone());

        Self {
            records,
            next_id,
            live,
        }
    }

    pub(super) fn insert(&mut self, record: NewRecord) -> LoggedRecord {
        let record = record.into_record(self.next_id);
        self.next_id += 1;
        self.records.push(record.clone());
        sort_newest_first(&mut self.records);
        self.publish();
        record
    }

    pub(super) fn delete(&mut self, id: RecordId) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = before - self.records.len();
        if removed > 0 {
            self.publish();
        }
        removed
    }

    pub(super) fn get(&self, id: RecordId) -> Option<LoggedRecord> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    /// Id the next insert will receive.
    pub(super) fn next_id(&self) -> RecordId {
        self.next_id
    }

    pub(super) fn records(&self) -> &[LoggedRecord] {
        &self.records
    }

    pub(super) fn subscribe(&self) -> watch::Receiver<Vec<LoggedRecord>> {
        self.live.subscribe()
    }

    fn publish(&self) {
        self.live.send_replace(self.records.clone());
    }
}

/// Newest first; ties broken by id so ordering is stable.
fn sort_newest_first(records: &mut [LoggedRecord]) {
    records.sort_by(|a, b| {
        b.recorded_at_millis
            .cmp(&a.recorded_at_millis)
            .then(b.id.cmp(&a.id))
    });
}

/// Record store that lives only as long as the process.
pub struct MemoryRecordStore {
    table: Mutex<RecordTable>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            table: Mutex::new(RecordTable::new(Vec::new())),
        }
    }

    fn table(&self) -> MutexGuard<'_, RecordTable> {
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryRecordStore {
    fn insert(&self, record: NewRecord) -> Result<RecordId, StoreError> {
        Ok(self.table().insert(record).id)
    }

    fn get_all(&self) -> watch::Receiver<Vec<LoggedRecord>> {
        self.table().subscribe()
    }

    fn delete(&self, record: &LoggedRecord) -> Result<usize, StoreError> {
        Ok(self.table().delete(record.id))
    }

    fn get_by_id(&self, id: RecordId) -> Result<Option<LoggedRecord>, StoreError> {
        Ok(self.table().get(id))
    }
}
