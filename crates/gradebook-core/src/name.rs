//! Validated personal-name fields.
//!
//! A [`NameField`] stores the last value that passed validation. Every
//! assignment re-validates, a rejected assignment leaves the stored value
//! untouched, and the field can never be removed.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RecordError, ValidationRule};

/// Which of the three name components a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameKind {
    First,
    Middle,
    Last,
}

impl NameKind {
    /// Field name used in error messages and session files.
    pub fn field_name(self) -> &'static str {
        match self {
            NameKind::First => "first_name",
            NameKind::Middle => "middle_name",
            NameKind::Last => "last_name",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Check a candidate name against the alphabetic and title-case rules.
pub fn validate_name(kind: NameKind, value: &str) -> Result<(), RecordError> {
    let field = kind.field_name().to_string();

    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err(RecordError::Validation(ValidationRule::Empty { field }));
    };

    if !value.chars().all(char::is_alphabetic) {
        return Err(RecordError::Validation(ValidationRule::NotAlphabetic {
            field,
            value: value.to_string(),
        }));
    }

    if !first.is_uppercase() || !chars.all(char::is_lowercase) {
        return Err(RecordError::Validation(ValidationRule::NotTitleCase {
            field,
            value: value.to_string(),
        }));
    }

    Ok(())
}

/// A name component that only ever holds a valid value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameField {
    kind: NameKind,
    value: Option<String>,
}

impl NameField {
    /// Create an unset field.
    pub fn unset(kind: NameKind) -> Self {
        Self { kind, value: None }
    }

    /// Create a field holding `value`, validating it first.
    pub fn new(kind: NameKind, value: &str) -> Result<Self, RecordError> {
        let mut field = Self::unset(kind);
        field.set(value)?;
        Ok(field)
    }

    pub fn kind(&self) -> NameKind {
        self.kind
    }

    /// The last valid value, or `None` if nothing has been assigned yet.
    pub fn get(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Validate and store a new value.
    pub fn set(&mut self, value: &str) -> Result<(), RecordError> {
        validate_name(self.kind, value)?;
        self.value = Some(value.to_string());
        Ok(())
    }

    /// Validate and store an untyped value; anything other than a string is
    /// a type mismatch.
    pub fn set_value(&mut self, value: &Value) -> Result<(), RecordError> {
        match value {
            Value::String(s) => self.set(s),
            other => Err(RecordError::TypeMismatch {
                value: other.to_string(),
            }),
        }
    }

    /// Name fields cannot be removed; this always fails.
    pub fn delete(&mut self) -> Result<(), RecordError> {
        Err(RecordError::ImmutableField {
            field: self.kind.field_name().to_string(),
            reason: "name fields cannot be deleted".into(),
        })
    }
}
