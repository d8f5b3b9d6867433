//! gradebook-core — Validated student records with grade aggregation.
//!
//! This crate defines the student record model: validated name fields, a
//! subject roster fixed at load time, and the grade and test-score averages
//! recomputed as marks are recorded.

pub mod error;
pub mod name;
pub mod report;
pub mod roster;
pub mod session;
pub mod source;
pub mod statistics;
pub mod student;

pub use error::{ErrorKind, RecordError, ValidationRule};
pub use name::{NameField, NameKind};
pub use report::{StudentReport, SubjectSummary};
pub use roster::{MarkKind, SubjectEntry, SubjectRoster};
pub use source::{CsvSubjectSource, InlineSubjects, SubjectSource};
pub use student::{RecordState, StudentRecord};
