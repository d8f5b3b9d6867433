//! Student record error types.
//!
//! Every failure is raised at the point of violation and returned to the
//! caller unchanged. `RecordError::kind` lets callers branch on the broad
//! category without string matching.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roster::MarkKind;

/// The rule a value failed during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    /// The name was an empty string.
    Empty { field: String },
    /// The name contained something other than letters.
    NotAlphabetic { field: String, value: String },
    /// The name was not a single title-case word.
    NotTitleCase { field: String, value: String },
    /// The subject is not part of the student's roster.
    SubjectNotStudied { subject: String },
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Empty { field } => write!(f, "{field} must not be empty"),
            ValidationRule::NotAlphabetic { field, value } => {
                write!(f, "{field} value \"{value}\" must contain only letters")
            }
            ValidationRule::NotTitleCase { field, value } => write!(
                f,
                "{field} value \"{value}\" must start with an uppercase letter followed by lowercase letters"
            ),
            ValidationRule::SubjectNotStudied { subject } => {
                write!(f, "subject \"{subject}\" is not studied by this student")
            }
        }
    }
}

/// Errors raised by the student record model.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A name field received a value that is not text.
    #[error("value {value} must be text")]
    TypeMismatch { value: String },

    /// A name failed validation, or an operation targeted an unknown subject.
    #[error("validation failed: {0}")]
    Validation(ValidationRule),

    /// A grade or test score fell outside its allowed band.
    #[error("{kind} {value} outside allowed range {min}-{max}")]
    Range {
        kind: MarkKind,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A name field deletion, or a second roster assignment.
    #[error("{field} cannot be modified: {reason}")]
    ImmutableField { field: String, reason: String },

    /// A mark was recorded before the roster was loaded.
    #[error("subject list is not loaded yet")]
    NotReady,

    /// The subject source could not be read.
    #[error("failed to read subjects from {origin}: {reason}")]
    Source { origin: String, reason: String },
}

/// Broad category of a [`RecordError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TypeMismatch,
    Validation,
    Range,
    ImmutableField,
    NotReady,
    Source,
}

impl RecordError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            RecordError::Validation(_) => ErrorKind::Validation,
            RecordError::Range { .. } => ErrorKind::Range,
            RecordError::ImmutableField { .. } => ErrorKind::ImmutableField,
            RecordError::NotReady => ErrorKind::NotReady,
            RecordError::Source { .. } => ErrorKind::Source,
        }
    }

    pub(crate) fn subject_not_studied(subject: &str) -> Self {
        RecordError::Validation(ValidationRule::SubjectNotStudied {
            subject: subject.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_message() {
        let err = RecordError::Range {
            kind: MarkKind::Grade,
            value: 6,
            min: 2,
            max: 5,
        };
        assert_eq!(err.to_string(), "grade 6 outside allowed range 2-5");
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn subject_not_studied_is_validation() {
        let err = RecordError::subject_not_studied("химия");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("not studied by this student"));
    }
}
