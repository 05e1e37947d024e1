//! Record validation.
//!
//! A pure check over a candidate record, independent of cache and store
//! state. Runs before anything is persisted or cached.

use crate::error::{Error, Result};
use crate::record::RecordDraft;

/// Reason reported for a blank name.
pub const NAME_EMPTY: &str = "name empty";
/// Reason reported for a zero, negative or NaN score.
pub const NON_POSITIVE_SCORE: &str = "non-positive score";

/// Stateless validator for candidate records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a candidate, returning it unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] when the name is blank or the score
    /// is not strictly positive.
    pub fn validate<'a>(&self, draft: &'a RecordDraft) -> Result<&'a RecordDraft> {
        validate(draft)
    }
}

/// Validates a candidate, returning it unchanged on success.
///
/// # Errors
///
/// Returns [`Error::InvalidRecord`] when the name is blank or the score is not
/// strictly positive.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn validate(draft: &RecordDraft) -> Result<&RecordDraft> {
    if draft.name.trim().is_empty() {
        return Err(Error::InvalidRecord(NAME_EMPTY.to_string()));
    }
    // `!(x > 0.0)` also rejects NaN
    if !(draft.score > 0.0) {
        return Err(Error::InvalidRecord(NON_POSITIVE_SCORE.to_string()));
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(result: Result<&RecordDraft>) -> String {
        match result {
            Err(Error::InvalidRecord(reason)) => reason,
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_draft_returned_unchanged() {
        let draft = RecordDraft::new("Ana", 5.0);

        let validated = validate(&draft).unwrap();

        assert_eq!(validated, &draft);
        assert!(std::ptr::eq(validated, &draft));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(reason(validate(&RecordDraft::new("", 5.0))), NAME_EMPTY);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(reason(validate(&RecordDraft::new(" \t\n", 5.0))), NAME_EMPTY);
    }

    #[test]
    fn test_zero_score_rejected() {
        assert_eq!(
            reason(validate(&RecordDraft::new("Ana", 0.0))),
            NON_POSITIVE_SCORE
        );
    }

    #[test]
    fn test_negative_score_rejected() {
        assert_eq!(
            reason(validate(&RecordDraft::new("Ana", -1.5))),
            NON_POSITIVE_SCORE
        );
    }

    #[test]
    fn test_nan_score_rejected() {
        assert_eq!(
            reason(validate(&RecordDraft::new("Ana", f64::NAN))),
            NON_POSITIVE_SCORE
        );
    }

    #[test]
    fn test_name_checked_before_score() {
        assert_eq!(reason(validate(&RecordDraft::new("", -1.0))), NAME_EMPTY);
    }

    #[test]
    fn test_tiny_positive_score_accepted() {
        assert!(validate(&RecordDraft::new("Leo", f64::MIN_POSITIVE)).is_ok());
    }

    #[test]
    fn test_validator_is_repeatable() {
        let validator = Validator::new();
        let draft = RecordDraft::new("Zoe", 9.0);

        for _ in 0..3 {
            assert!(validator.validate(&draft).is_ok());
        }
        assert_eq!(draft, RecordDraft::new("Zoe", 9.0));
    }
}
