//! In-memory record store.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;

use super::{RecordStore, StoreResult};
use crate::record::{Record, RecordDraft, RecordId};

/// Process-local [`RecordStore`] backed by an ordered map.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Debug)]
struct MemoryInner {
    records: BTreeMap<RecordId, Record>,
    next_id: RecordId,
}

impl MemoryInner {
    fn insert(&mut self, draft: &RecordDraft) -> Record {
        let id = self.next_id;
        self.next_id += 1;

        let now = Utc::now();
        let record = Record {
            id,
            name: draft.name.clone(),
            score: draft.score,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };
        self.records.insert(id, record.clone());
        record
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(MemoryInner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl MemoryStore {
    /// Create an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, soft-deleted ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the store holds no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    fn live<F>(&self, keep: F) -> Vec<Record>
    where
        F: Fn(&Record) -> bool,
    {
        self.inner
            .read()
            .records
            .values()
            .filter(|r| !r.is_deleted && keep(r))
            .cloned()
            .collect()
    }
}

impl RecordStore for MemoryStore {
    fn find_all(&self) -> StoreResult<Vec<Record>> {
        Ok(self.live(|_| true))
    }

    fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Record>> {
        let inner = self.inner.read();
        Ok(inner.records.get(&id).filter(|r| !r.is_deleted).cloned())
    }

    #[allow(clippy::float_cmp)]
    fn find_by_score(&self, score: f64) -> StoreResult<Vec<Record>> {
        Ok(self.live(|r| r.score == score))
    }

    fn save(&self, draft: &RecordDraft) -> StoreResult<Record> {
        Ok(self.inner.write().insert(draft))
    }

    fn update(&self, id: RecordId, draft: &RecordDraft) -> StoreResult<Option<Record>> {
        let mut inner = self.inner.write();
        let Some(record) = inner.records.get_mut(&id).filter(|r| !r.is_deleted) else {
            return Ok(None);
        };

        record.name.clone_from(&draft.name);
        record.score = draft.score;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    fn soft_delete(&self, id: RecordId) -> StoreResult<Option<Record>> {
        let mut inner = self.inner.write();
        let Some(record) = inner.records.get_mut(&id).filter(|r| !r.is_deleted) else {
            return Ok(None);
        };

        record.is_deleted = true;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    fn find_all_including_deleted(&self) -> StoreResult<Vec<Record>> {
        Ok(self.inner.read().records.values().cloned().collect())
    }

    fn remove_all(&self) -> StoreResult<()> {
        let mut inner = self.inner.write();
        inner.records.clear();
        inner.next_id = 1;
        Ok(())
    }

    fn replace_all(&self, drafts: &[RecordDraft]) -> StoreResult<Vec<Record>> {
        let mut inner = self.inner.write();
        inner.records.clear();
        inner.next_id = 1;
        Ok(drafts.iter().map(|draft| inner.insert(draft)).collect())
    }
}
