//! The student record: three validated names plus a subject roster.

use std::fmt;

use serde_json::Value;

use crate::error::RecordError;
use crate::name::{NameField, NameKind};
use crate::report::{StudentReport, SubjectSummary};
use crate::roster::{MarkKind, SubjectRoster};
use crate::source::SubjectSource;

/// Lifecycle state of a [`StudentRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Names are set but the roster has not been loaded.
    Uninitialized,
    /// The roster is loaded; marks can be recorded.
    Ready,
}

/// A single student with validated names and a fixed subject roster.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    first_name: NameField,
    middle_name: NameField,
    last_name: NameField,
    roster: Option<SubjectRoster>,
}

impl StudentRecord {
    /// Validate the three names and load the roster from `source`.
    pub fn new(
        first_name: &str,
        middle_name: &str,
        last_name: &str,
        source: &dyn SubjectSource,
    ) -> Result<Self, RecordError> {
        let mut record = Self::with_names(first_name, middle_name, last_name)?;
        record.load_roster(source)?;
        Ok(record)
    }

    /// Same as [`StudentRecord::new`] but with untyped name values, so that
    /// a non-text name surfaces as [`RecordError::TypeMismatch`].
    pub fn from_values(
        first_name: &Value,
        middle_name: &Value,
        last_name: &Value,
        source: &dyn SubjectSource,
    ) -> Result<Self, RecordError> {
        let mut record = Self::unset();
        record.first_name.set_value(first_name)?;
        record.middle_name.set_value(middle_name)?;
        record.last_name.set_value(last_name)?;
        record.load_roster(source)?;
        Ok(record)
    }

    /// Validate the names without loading a roster. The record stays
    /// [`RecordState::Uninitialized`] until [`StudentRecord::load_roster`].
    pub fn with_names(
        first_name: &str,
        middle_name: &str,
        last_name: &str,
    ) -> Result<Self, RecordError> {
        let mut record = Self::unset();
        record.first_name.set(first_name)?;
        record.middle_name.set(middle_name)?;
        record.last_name.set(last_name)?;
        Ok(record)
    }

    fn unset() -> Self {
        Self {
            first_name: NameField::unset(NameKind::First),
            middle_name: NameField::unset(NameKind::Middle),
            last_name: NameField::unset(NameKind::Last),
            roster: None,
        }
    }

    pub fn state(&self) -> RecordState {
        if self.roster.is_some() {
            RecordState::Ready
        } else {
            RecordState::Uninitialized
        }
    }

    /// Load the subject roster. Only the first call succeeds; later calls
    /// fail and leave the existing roster intact.
    pub fn load_roster(&mut self, source: &dyn SubjectSource) -> Result<(), RecordError> {
        if self.roster.is_some() {
            return Err(RecordError::ImmutableField {
                field: "subjects".into(),
                reason: "subject list already defined".into(),
            });
        }
        self.roster = Some(SubjectRoster::load(source)?);
        Ok(())
    }

    pub fn roster(&self) -> Option<&SubjectRoster> {
        self.roster.as_ref()
    }

    fn field(&self, kind: NameKind) -> &NameField {
        match kind {
            NameKind::First => &self.first_name,
            NameKind::Middle => &self.middle_name,
            NameKind::Last => &self.last_name,
        }
    }

    fn field_mut(&mut self, kind: NameKind) -> &mut NameField {
        match kind {
            NameKind::First => &mut self.first_name,
            NameKind::Middle => &mut self.middle_name,
            NameKind::Last => &mut self.last_name,
        }
    }

    /// Current value of a name component.
    pub fn name(&self, kind: NameKind) -> &str {
        self.field(kind).get().unwrap_or_default()
    }

    pub fn first_name(&self) -> &str {
        self.name(NameKind::First)
    }

    pub fn middle_name(&self) -> &str {
        self.name(NameKind::Middle)
    }

    pub fn last_name(&self) -> &str {
        self.name(NameKind::Last)
    }

    /// Reassign a name component; the new value must pass validation.
    pub fn set_name(&mut self, kind: NameKind, value: &str) -> Result<(), RecordError> {
        self.field_mut(kind).set(value)
    }

    /// Name components cannot be removed; this always fails.
    pub fn delete_name(&mut self, kind: NameKind) -> Result<(), RecordError> {
        self.field_mut(kind).delete()
    }

    /// First, middle and last name joined by spaces.
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name(),
            self.middle_name(),
            self.last_name()
        )
    }

    /// Record a grade or test score against a subject on the roster.
    pub fn record_grade(
        &mut self,
        subject: &str,
        value: i64,
        kind: MarkKind,
    ) -> Result<(), RecordError> {
        let roster = self.roster.as_mut().ok_or(RecordError::NotReady)?;
        roster.record(subject, value, kind)
    }

    /// Mean of every grade across every subject.
    pub fn grade_average(&self) -> Option<f64> {
        self.roster.as_ref().and_then(SubjectRoster::grade_average)
    }

    /// Test average for one subject.
    pub fn test_average(&self, subject: &str) -> Option<f64> {
        self.roster.as_ref().and_then(|r| r.test_average(subject))
    }

    /// Snapshot of the name, the grade average and each subject's test
    /// average in roster order.
    pub fn report(&self) -> StudentReport {
        let subjects = self
            .roster
            .iter()
            .flat_map(|roster| roster.iter())
            .map(|(name, entry)| SubjectSummary {
                name: name.to_string(),
                grade_count: entry.grades.len(),
                test_count: entry.test_scores.len(),
                test_average: entry.test_average,
            })
            .collect();

        StudentReport {
            full_name: self.full_name(),
            grade_average: self.grade_average(),
            subjects,
        }
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.report(), f)
    }
}
