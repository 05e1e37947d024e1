//! Record service: validated CRUD over a [`RecordStore`] with a write-through
//! [`BoundedCache`].
//!
//! Every mutation completes in the store before the cache is touched, and a
//! validation or store failure leaves the cache exactly as it was. Reads go to
//! the store unless read-through is enabled.
//!
//! Mutations hold the service write lock across their store and cache steps,
//! so the cache always reflects the last completed mutation of each id.
//! Read-through lookups take the read lock and never observe a store step
//! without its cache step.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::BoundedCache;
use crate::error::{Error, Result};
use crate::record::{Record, RecordDraft, RecordId};
use crate::store::RecordStore;
use crate::validator::Validator;

/// Cache-consistent record service.
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    cache: BoundedCache<RecordId, Record>,
    validator: Validator,
    read_through: bool,
    /// Pairs each store mutation with its cache mutation.
    writes: RwLock<()>,
}

impl RecordService {
    /// Creates a service over `store` using `cache` for recently written
    /// records. Read-through is off.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, cache: BoundedCache<RecordId, Record>) -> Self {
        Self {
            store,
            cache,
            validator: Validator::new(),
            read_through: false,
            writes: RwLock::new(()),
        }
    }

    /// Makes [`find_by_id`](Self::find_by_id) consult the cache before the
    /// store.
    #[must_use]
    pub fn with_read_through(mut self, enabled: bool) -> Self {
        self.read_through = enabled;
        self
    }

    /// Whether lookups by id consult the cache first.
    #[must_use]
    pub fn read_through(&self) -> bool {
        self.read_through
    }

    /// The cache of recently written records.
    #[must_use]
    pub fn cache(&self) -> &BoundedCache<RecordId, Record> {
        &self.cache
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// All live records, straight from the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the store fails.
    pub fn get_all(&self) -> Result<Vec<Record>> {
        debug!("Fetching all records");
        Ok(self.store.find_all()?)
    }

    /// Live records with exactly `score`, straight from the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the store fails.
    pub fn get_by_score(&self, score: f64) -> Result<Vec<Record>> {
        debug!(score, "Fetching records by score");
        Ok(self.store.find_by_score(score)?)
    }

    /// The live record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no live record has this id, or
    /// [`Error::Store`] if the store fails.
    pub fn find_by_id(&self, id: RecordId) -> Result<Record> {
        debug!(id, read_through = self.read_through, "Fetching record by id");

        if self.read_through {
            let _guard = self.writes.read();
            if let Ok(record) = self.cache.get(&id) {
                return Ok(record);
            }
            return self.store.find_by_id(id)?.ok_or(Error::NotFound(id));
        }

        self.store.find_by_id(id)?.ok_or(Error::NotFound(id))
    }

    /// Validates and persists a new record, then caches it under its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] or [`Error::Store`]; neither touches
    /// the cache.
    pub fn create(&self, draft: &RecordDraft) -> Result<Record> {
        debug!(name = %draft.name, score = draft.score, "Creating record");

        let draft = self.validator.validate(draft)?;
        let _guard = self.writes.write();
        let saved = self.store.save(draft)?;
        Ok(self.cache.put(saved.id, saved))
    }

    /// Validates and applies `draft` to the live record `id`, then caches the
    /// result under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`], [`Error::NotUpdated`] if `id` is
    /// unknown or soft-deleted, or [`Error::Store`]. None of these touch the
    /// cache.
    pub fn update(&self, id: RecordId, draft: &RecordDraft) -> Result<Record> {
        debug!(id, name = %draft.name, score = draft.score, "Updating record");

        let draft = self.validator.validate(draft)?;
        let _guard = self.writes.write();
        let updated = self.store.update(id, draft)?.ok_or(Error::NotUpdated(id))?;
        Ok(self.cache.put(id, updated))
    }

    /// Soft-deletes the live record `id` and drops it from the cache.
    ///
    /// Returns the record as marked deleted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDeleted`] if `id` is unknown or already deleted, or
    /// [`Error::Store`]. Neither touches the cache.
    pub fn delete(&self, id: RecordId) -> Result<Record> {
        debug!(id, "Deleting record");

        let _guard = self.writes.write();
        let deleted = self.store.soft_delete(id)?.ok_or(Error::NotDeleted(id))?;
        // absent when already evicted or never cached
        let _ = self.cache.remove(&id);
        Ok(deleted)
    }

    /// Replaces the store contents with the demo records and empties the
    /// cache, whose entries no longer describe stored records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if seeding fails; store and cache are then
    /// unchanged.
    pub fn reseed(&self) -> Result<Vec<Record>> {
        debug!("Reseeding demo records");

        let _guard = self.writes.write();
        let seeded = crate::store::demo::seed(self.store.as_ref())?;
        self.cache.clear();
        Ok(seeded)
    }
}

impl std::fmt::Debug for RecordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordService")
            .field("cache", &self.cache)
            .field("read_through", &self.read_through)
            .finish_non_exhaustive()
    }
}
