//! Record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned record identifier.
pub type RecordId = i64;

/// A stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier assigned by the store on creation. Never changes.
    pub id: RecordId,
    /// Display name. Non-blank for any persisted record.
    pub name: String,
    /// Score. Strictly positive for any persisted record.
    pub score: f64,
    /// Creation time, fixed.
    pub created_at: DateTime<Utc>,
    /// Last mutation time, including soft delete.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub is_deleted: bool,
}

/// Candidate record: the caller-supplied fields, before the store assigns an
/// id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    /// Display name.
    pub name: String,
    /// Score.
    pub score: f64,
}

impl RecordDraft {
    /// Creates a new draft.
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}
