//! Record storage.
//!
//! The service reaches durable state only through [`RecordStore`]. Two
//! backends are provided:
//!
//! - [`MemoryStore`]: process-local, for tests and the demo walkthrough
//! - [`SqliteStore`]: file-backed (or in-memory) SQLite via `rusqlite`
//!
//! Soft-deleted records stay in the store but are invisible to every
//! operation except [`RecordStore::find_all_including_deleted`].

pub mod demo;
mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::record::{Record, RecordDraft, RecordId};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Store-level failures. The service propagates these without interpreting
/// them.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite failure.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A thread panicked while holding the connection.
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// A stored row could not be decoded.
    #[error("Corrupt record {id}: {reason}")]
    Corrupt {
        /// Row id.
        id: RecordId,
        /// What failed to decode.
        reason: String,
    },

    /// IO error while preparing the database location.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable keyed storage for records with soft-delete semantics.
///
/// Implementations assign ids on [`save`](RecordStore::save) and never reuse
/// them except after [`remove_all`](RecordStore::remove_all).
pub trait RecordStore: Send + Sync {
    /// All live records, ordered by id.
    fn find_all(&self) -> StoreResult<Vec<Record>>;

    /// The live record with this id, if any.
    fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Record>>;

    /// Live records whose score equals `score`, ordered by id.
    fn find_by_score(&self, score: f64) -> StoreResult<Vec<Record>>;

    /// Persists a new record, assigning its id and timestamps.
    fn save(&self, draft: &RecordDraft) -> StoreResult<Record>;

    /// Overwrites name and score of a live record and refreshes `updated_at`.
    ///
    /// Returns `None` if the id is unknown or soft-deleted.
    fn update(&self, id: RecordId, draft: &RecordDraft) -> StoreResult<Option<Record>>;

    /// Marks a live record deleted and refreshes `updated_at`.
    ///
    /// Returns `None` if the id is unknown or already deleted.
    fn soft_delete(&self, id: RecordId) -> StoreResult<Option<Record>>;

    /// Every stored record, soft-deleted ones included, ordered by id.
    fn find_all_including_deleted(&self) -> StoreResult<Vec<Record>>;

    /// Erases every record and restarts id assignment.
    fn remove_all(&self) -> StoreResult<()>;

    /// Erases every record, restarts id assignment and saves `drafts` in
    /// order, as one unit.
    ///
    /// On failure the store is left as it was before the call.
    fn replace_all(&self, drafts: &[RecordDraft]) -> StoreResult<Vec<Record>>;
}
