//! Demo data set used by `database.init_data` and the CLI `seed` command.

use tracing::info;

use super::{RecordStore, StoreResult};
use crate::record::{Record, RecordDraft};

/// The four demo records, in insertion order.
#[must_use]
pub fn demo_records() -> Vec<RecordDraft> {
    vec![
        RecordDraft::new("Pepe", 4.8),
        RecordDraft::new("Lucia", 7.8),
        RecordDraft::new("Maria", 5.1),
        RecordDraft::new("Alejandro", 6.0),
    ]
}

/// Replaces the store contents with [`demo_records`] in one unit, returning
/// what was saved.
///
/// Works on the store directly. Callers holding a cache over this store must
/// clear it; [`RecordService::reseed`](crate::RecordService::reseed) does.
///
/// # Errors
///
/// Propagates any store failure, in which case the store is unchanged.
pub fn seed(store: &dyn RecordStore) -> StoreResult<Vec<Record>> {
    let saved = store.replace_all(&demo_records())?;
    info!(count = saved.len(), "Seeded demo records");
    Ok(saved)
}
