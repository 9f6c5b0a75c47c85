//! Saved snapshot records.
//!
//! [`RecordStore`] is the persistence seam used by the acquisition
//! coordinator and the CLI. Two implementations are provided:
//!
//! - [`MemoryRecordStore`] - process-lifetime storage, used in tests
//! - [`JsonFileRecordStore`] - a JSON array on disk
//!
//! Both expose a live, newest-first view of all records through a
//! `tokio::sync::watch` channel.

mod error;
mod file;
mod memory;
mod record;

pub use error::StoreError;
pub use file::JsonFileRecordStore;
pub use memory::MemoryRecordStore;
pub use record::{LoggedRecord, NewRecord, RecordId};

use tokio::sync::watch;

/// Persistence for saved snapshots.
pub trait RecordStore: Send + Sync {
    /// Store a record, returning its newly assigned id.
    fn insert(&self, record: NewRecord) -> Result<RecordId, StoreError>;

    /// Live view of all records, sorted by `recorded_at_millis` descending.
    ///
    /// The receiver sees every later insert and delete.
    fn get_all(&self) -> watch::Receiver<Vec<LoggedRecord>>;

    /// Delete the record with the same id, returning how many rows went away.
    fn delete(&self, record: &LoggedRecord) -> Result<usize, StoreError>;

    /// Look up a single record.
    fn get_by_id(&self, id: RecordId) -> Result<Option<LoggedRecord>, StoreError>;
}
