//! The subject roster and its aggregates.
//!
//! The set of subjects is fixed when the roster is loaded. Marks may only be
//! recorded against those subjects, and each accepted mark immediately
//! refreshes the matching average: a grade refreshes the global grade
//! average, a test score refreshes that subject's test average.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::source::SubjectSource;
use crate::statistics::mean;

/// Lowest allowed grade.
pub const GRADE_MIN: i64 = 2;
/// Highest allowed grade.
pub const GRADE_MAX: i64 = 5;
/// Lowest allowed test score.
pub const TEST_SCORE_MIN: i64 = 0;
/// Highest allowed test score.
pub const TEST_SCORE_MAX: i64 = 100;

/// Kind of mark recorded against a subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    #[default]
    Grade,
    Test,
}

impl MarkKind {
    /// Inclusive `(min, max)` band for this kind of mark.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            MarkKind::Grade => (GRADE_MIN, GRADE_MAX),
            MarkKind::Test => (TEST_SCORE_MIN, TEST_SCORE_MAX),
        }
    }

    /// Check `value` against the band, returning it narrowed on success.
    pub fn check(self, value: i64) -> Result<u8, RecordError> {
        let (min, max) = self.bounds();
        if (min..=max).contains(&value) {
            // Both bands fit in a u8.
            Ok(value as u8)
        } else {
            Err(RecordError::Range {
                kind: self,
                value,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for MarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkKind::Grade => write!(f, "grade"),
            MarkKind::Test => write!(f, "test score"),
        }
    }
}

impl FromStr for MarkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grade" => Ok(MarkKind::Grade),
            "test" | "test_score" => Ok(MarkKind::Test),
            other => Err(format!("unknown mark kind: {other}")),
        }
    }
}

/// Marks recorded for a single subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectEntry {
    /// Grades in recording order, each in 2..=5.
    pub grades: Vec<u8>,
    /// Test scores in recording order, each in 0..=100.
    pub test_scores: Vec<u8>,
    /// Mean of `test_scores`; `None` until the first score.
    pub test_average: Option<f64>,
}

/// Fixed set of subjects with their marks.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRoster {
    names: Vec<String>,
    entries: Vec<SubjectEntry>,
    index: HashMap<String, usize>,
    grade_average: Option<f64>,
}

impl SubjectRoster {
    /// Build a roster from subject names, keeping the first occurrence of
    /// each distinct name.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self {
            names: Vec::new(),
            entries: Vec::new(),
            index: HashMap::new(),
            grade_average: None,
        };
        for name in names {
            let name = name.into();
            if roster.index.contains_key(&name) {
                continue;
            }
            roster.index.insert(name.clone(), roster.names.len());
            roster.names.push(name);
            roster.entries.push(SubjectEntry::default());
        }
        roster
    }

    /// Load a roster from a subject source.
    pub fn load(source: &dyn SubjectSource) -> Result<Self, RecordError> {
        let names = source.subject_names()?;
        let roster = Self::from_names(names);
        tracing::debug!(
            origin = %source.origin(),
            subjects = roster.len(),
            "loaded subject roster"
        );
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.index.contains_key(subject)
    }

    /// Entry for `subject`, if it is on the roster.
    pub fn get(&self, subject: &str) -> Option<&SubjectEntry> {
        self.index.get(subject).map(|&i| &self.entries[i])
    }

    /// Subjects and their entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubjectEntry)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.entries.iter())
    }

    /// Mean of every grade across every subject; `None` until the first
    /// grade is recorded.
    pub fn grade_average(&self) -> Option<f64> {
        self.grade_average
    }

    /// Test average for `subject`, if it is on the roster.
    pub fn test_average(&self, subject: &str) -> Option<f64> {
        self.get(subject).and_then(|e| e.test_average)
    }

    /// Record a mark against a subject and refresh the affected average.
    ///
    /// The subject and the value are both checked before anything changes,
    /// so a rejected mark leaves the roster untouched.
    pub fn record(&mut self, subject: &str, value: i64, kind: MarkKind) -> Result<(), RecordError> {
        let Some(&i) = self.index.get(subject) else {
            return Err(RecordError::subject_not_studied(subject));
        };
        let mark = kind.check(value)?;

        match kind {
            MarkKind::Grade => {
                self.entries[i].grades.push(mark);
                self.grade_average = mean(
                    self.entries
                        .iter()
                        .flat_map(|e| e.grades.iter().copied()),
                );
            }
            MarkKind::Test => {
                let entry = &mut self.entries[i];
                entry.test_scores.push(mark);
                entry.test_average = mean(entry.test_scores.iter().copied());
            }
        }

        tracing::debug!(subject, value, %kind, "recorded mark");
        Ok(())
    }
}
