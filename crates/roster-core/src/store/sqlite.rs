//! SQLite-backed record store.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::{RecordStore, StoreError, StoreResult};
use crate::record::{Record, RecordDraft, RecordId};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS records (
    id          INTEGER PRIMARY KEY,
    name        TEXT    NOT NULL,
    score       REAL    NOT NULL,
    created_at  TEXT    NOT NULL,
    updated_at  TEXT    NOT NULL,
    is_deleted  INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_records_score ON records(score);
";

const COLUMNS: &str = "id, name, score, created_at, updated_at, is_deleted";

/// [`RecordStore`] persisted in SQLite.
///
/// `id` is a plain `INTEGER PRIMARY KEY` (rowid alias) so that erasing the
/// table restarts id assignment at 1.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

/// A row as stored, before timestamp decoding.
struct RawRow {
    id: RecordId,
    name: String,
    score: f64,
    created_at: String,
    updated_at: String,
    is_deleted: bool,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            score: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
            is_deleted: row.get::<_, i64>(5)? != 0,
        })
    }

    fn into_record(self) -> StoreResult<Record> {
        let created_at = parse_timestamp(self.id, &self.created_at)?;
        let updated_at = parse_timestamp(self.id, &self.updated_at)?;
        Ok(Record {
            id: self.id,
            name: self.name,
            score: self.score,
            created_at,
            updated_at,
            is_deleted: self.is_deleted,
        })
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(id: RecordId, raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt {
            id,
            reason: format!("invalid timestamp '{raw}': {e}"),
        })
}

impl SqliteStore {
    /// Open (or create) a file-backed store.
    ///
    /// Missing parent directories are created.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "opening SQLite record store");
        Self::from_connection(Connection::open(path)?)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> StoreResult<Self> {
        debug!("opening in-memory SQLite record store");
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Create store from existing connection.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        Self::init_connection(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_connection(conn: &Connection) -> StoreResult<()> {
        // WAL mode for file-backed DBs (no-op for in-memory)
        let _ = conn.execute_batch("PRAGMA journal_mode = WAL;");
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn query_records<P>(&self, sql: &str, params: P) -> StoreResult<Vec<Record>>
    where
        P: rusqlite::Params,
    {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, RawRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawRow::into_record).collect()
    }

    fn live_row(conn: &Connection, id: RecordId) -> StoreResult<Option<RawRow>> {
        let row = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM records WHERE id = ?1 AND is_deleted = 0"),
                params![id],
                RawRow::from_row,
            )
            .optional()?;
        Ok(row)
    }

    fn insert_row(conn: &Connection, draft: &RecordDraft) -> StoreResult<Record> {
        let now = Utc::now();
        conn.execute(
            "INSERT INTO records (name, score, created_at, updated_at, is_deleted)
             VALUES (?1, ?2, ?3, ?3, 0)",
            params![draft.name, draft.score, format_timestamp(&now)],
        )?;

        Ok(Record {
            id: conn.last_insert_rowid(),
            name: draft.name.clone(),
            score: draft.score,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        })
    }
}

impl RecordStore for SqliteStore {
    fn find_all(&self) -> StoreResult<Vec<Record>> {
        self.query_records(
            &format!("SELECT {COLUMNS} FROM records WHERE is_deleted = 0 ORDER BY id"),
            [],
        )
    }

    fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Record>> {
        let conn = self.lock()?;
        Self::live_row(&conn, id)?
            .map(RawRow::into_record)
            .transpose()
    }

    fn find_by_score(&self, score: f64) -> StoreResult<Vec<Record>> {
        self.query_records(
            &format!(
                "SELECT {COLUMNS} FROM records WHERE is_deleted = 0 AND score = ?1 ORDER BY id"
            ),
            params![score],
        )
    }

    fn save(&self, draft: &RecordDraft) -> StoreResult<Record> {
        let conn = self.lock()?;
        Self::insert_row(&conn, draft)
    }

    fn update(&self, id: RecordId, draft: &RecordDraft) -> StoreResult<Option<Record>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let Some(existing) = Self::live_row(&tx, id)? else {
            return Ok(None);
        };
        let mut record = existing.into_record()?;
        record.name.clone_from(&draft.name);
        record.score = draft.score;
        record.updated_at = Utc::now();

        tx.execute(
            "UPDATE records SET name = ?1, score = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                record.name,
                record.score,
                format_timestamp(&record.updated_at),
                id
            ],
        )?;
        tx.commit()?;
        Ok(Some(record))
    }

    fn soft_delete(&self, id: RecordId) -> StoreResult<Option<Record>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let Some(existing) = Self::live_row(&tx, id)? else {
            return Ok(None);
        };
        let mut record = existing.into_record()?;
        record.is_deleted = true;
        record.updated_at = Utc::now();

        tx.execute(
            "UPDATE records SET is_deleted = 1, updated_at = ?1 WHERE id = ?2",
            params![format_timestamp(&record.updated_at), id],
        )?;
        tx.commit()?;
        Ok(Some(record))
    }

    fn find_all_including_deleted(&self) -> StoreResult<Vec<Record>> {
        self.query_records(&format!("SELECT {COLUMNS} FROM records ORDER BY id"), [])
    }

    fn remove_all(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM records", [])?;
        Ok(())
    }

    fn replace_all(&self, drafts: &[RecordDraft]) -> StoreResult<Vec<Record>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM records", [])?;
        let saved = drafts
            .iter()
            .map(|draft| Self::insert_row(&tx, draft))
            .collect::<StoreResult<Vec<_>>>()?;

        tx.commit()?;
        debug!(count = saved.len(), "Replaced all records");
        Ok(saved)
    }
}
