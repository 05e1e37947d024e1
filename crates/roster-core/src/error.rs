//! Error types for Roster.
//!
//! This module provides the error type returned by every fallible service
//! operation. Cache misses are deliberately not part of it: they only reach
//! direct callers of [`crate::cache::BoundedCache`].

use crate::record::RecordId;
use crate::store::StoreError;
use thiserror::Error;

/// Result type alias for Roster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Roster operations.
///
/// Error codes follow the pattern `ROSTER-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Candidate record failed validation (ROSTER-001).
    #[error("[ROSTER-001] Invalid record: {0}")]
    InvalidRecord(String),

    /// No live record with this id (ROSTER-002).
    #[error("[ROSTER-002] Record with ID {0} not found")]
    NotFound(RecordId),

    /// Update targeted an unknown id (ROSTER-003).
    #[error("[ROSTER-003] Record with ID {0} was not updated")]
    NotUpdated(RecordId),

    /// Delete targeted an unknown id (ROSTER-004).
    #[error("[ROSTER-004] Record with ID {0} was not deleted")]
    NotDeleted(RecordId),

    /// Store failure, propagated untouched (ROSTER-005).
    #[error("[ROSTER-005] Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error (ROSTER-006).
    #[error("[ROSTER-006] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "ROSTER-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRecord(_) => "ROSTER-001",
            Self::NotFound(_) => "ROSTER-002",
            Self::NotUpdated(_) => "ROSTER-003",
            Self::NotDeleted(_) => "ROSTER-004",
            Self::Store(_) => "ROSTER-005",
            Self::Config(_) => "ROSTER-006",
        }
    }

    /// Returns true if the caller can fix this by changing its input.
    ///
    /// Store and configuration failures are environmental.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecord(_) | Self::NotFound(_) | Self::NotUpdated(_) | Self::NotDeleted(_)
        )
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
