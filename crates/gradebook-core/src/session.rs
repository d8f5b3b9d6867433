//! TOML session scripts.
//!
//! A session names a student, points at their subject list and lists the
//! marks to record in order. Running it yields the finished record.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::name::{NameField, NameKind};
use crate::roster::MarkKind;
use crate::source::{CsvSubjectSource, InlineSubjects, SubjectSource};
use crate::student::StudentRecord;

/// Intermediate TOML structure for parsing session files.
#[derive(Debug, Deserialize)]
struct TomlSessionFile {
    student: TomlStudent,
    #[serde(default)]
    marks: Vec<MarkEntry>,
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    #[serde(default)]
    first_name: Value,
    #[serde(default)]
    middle_name: Value,
    #[serde(default)]
    last_name: Value,
    #[serde(default)]
    subjects_file: Option<PathBuf>,
    #[serde(default)]
    subjects: Option<Vec<String>>,
}

/// Where a session's subjects come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectList {
    /// A CSV file, already resolved against the session file's directory.
    File(PathBuf),
    /// Names listed in the session itself.
    Inline(Vec<String>),
}

/// One mark to record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkEntry {
    pub subject: String,
    pub value: i64,
    #[serde(default)]
    pub kind: MarkKind,
}

/// A parsed session script.
#[derive(Debug, Clone)]
pub struct Session {
    pub first_name: Value,
    pub middle_name: Value,
    pub last_name: Value,
    pub subjects: SubjectList,
    pub marks: Vec<MarkEntry>,
}

/// A mark that was skipped in non-strict mode.
#[derive(Debug, Clone)]
pub struct RejectedMark {
    /// Position of the mark in the session, starting at 1.
    pub position: usize,
    pub mark: MarkEntry,
    pub reason: String,
}

/// Result of running a session.
#[derive(Debug)]
pub struct SessionOutcome {
    pub record: StudentRecord,
    pub rejected: Vec<RejectedMark>,
}

/// Parse a session file.
pub fn parse_session(path: &Path) -> Result<Session> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file: {}", path.display()))?;

    parse_session_str(&content, path)
}

/// Parse a TOML string into a `Session` (useful for testing).
///
/// A relative `subjects_file` is resolved against the directory of
/// `source_path`.
pub fn parse_session_str(content: &str, source_path: &Path) -> Result<Session> {
    let parsed: TomlSessionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let student = parsed.student;
    let subjects = match (student.subjects_file, student.subjects) {
        (Some(file), None) => {
            let file = if file.is_relative() {
                source_path
                    .parent()
                    .map(|dir| dir.join(&file))
                    .unwrap_or(file)
            } else {
                file
            };
            SubjectList::File(file)
        }
        (None, Some(names)) => SubjectList::Inline(names),
        (Some(_), Some(_)) => {
            anyhow::bail!(
                "{}: give either subjects_file or subjects, not both",
                source_path.display()
            )
        }
        (None, None) => {
            anyhow::bail!(
                "{}: one of subjects_file or subjects is required",
                source_path.display()
            )
        }
    };

    Ok(Session {
        first_name: student.first_name,
        middle_name: student.middle_name,
        last_name: student.last_name,
        subjects,
        marks: parsed.marks,
    })
}

impl Session {
    /// The subject source this session loads its roster from.
    pub fn source(&self) -> Box<dyn SubjectSource> {
        match &self.subjects {
            SubjectList::File(path) => Box::new(CsvSubjectSource::new(path)),
            SubjectList::Inline(names) => Box::new(InlineSubjects::new(names.iter().cloned())),
        }
    }

    /// Build the record and replay every mark in order.
    ///
    /// In strict mode the first rejected mark aborts the run. Otherwise the
    /// mark is logged, collected in [`SessionOutcome::rejected`] and skipped.
    pub fn run(&self, strict: bool) -> Result<SessionOutcome> {
        let source = self.source();
        let mut record = StudentRecord::from_values(
            &self.first_name,
            &self.middle_name,
            &self.last_name,
            source.as_ref(),
        )?;

        let mut rejected = Vec::new();
        for (i, mark) in self.marks.iter().enumerate() {
            let position = i + 1;
            if let Err(e) = record.record_grade(&mark.subject, mark.value, mark.kind) {
                if strict {
                    return Err(e).with_context(|| {
                        format!(
                            "mark #{position} ({} {} for {})",
                            mark.kind, mark.value, mark.subject
                        )
                    });
                }
                tracing::warn!(position, subject = %mark.subject, "skipping mark: {e}");
                rejected.push(RejectedMark {
                    position,
                    mark: mark.clone(),
                    reason: e.to_string(),
                });
            }
        }

        Ok(SessionOutcome { record, rejected })
    }
}

/// A warning from session validation.
#[derive(Debug, Clone)]
pub struct SessionWarning {
    /// Position of the offending mark (if applicable), starting at 1.
    pub position: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a session for names and marks that would make a run fail, without
/// building a record.
pub fn validate_session(session: &Session) -> Vec<SessionWarning> {
    let mut warnings = Vec::new();

    for (kind, value) in [
        (NameKind::First, &session.first_name),
        (NameKind::Middle, &session.middle_name),
        (NameKind::Last, &session.last_name),
    ] {
        if let Err(e) = NameField::unset(kind).set_value(value) {
            warnings.push(SessionWarning {
                position: None,
                message: e.to_string(),
            });
        }
    }

    // Only an inline list can be checked without touching the filesystem.
    let inline = match &session.subjects {
        SubjectList::Inline(names) => {
            if names.is_empty() {
                warnings.push(SessionWarning {
                    position: None,
                    message: "subject list is empty".into(),
                });
            }
            Some(names)
        }
        SubjectList::File(_) => None,
    };

    for (i, mark) in session.marks.iter().enumerate() {
        let position = Some(i + 1);

        if let Some(names) = inline {
            if !names.iter().any(|n| n == &mark.subject) {
                warnings.push(SessionWarning {
                    position,
                    message: format!("subject \"{}\" is not in the subject list", mark.subject),
                });
            }
        }

        if let Err(e) = mark.kind.check(mark.value) {
            warnings.push(SessionWarning {
                position,
                message: e.to_string(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const INLINE_SESSION: &str = r#"
[student]
first_name = "Иван"
middle_name = "Петрович"
last_name = "Иванов"
subjects = ["математика", "физика"]

[[marks]]
subject = "физика"
value = 5

[[marks]]
subject = "математика"
value = 3
kind = "grade"

[[marks]]
subject = "физика"
value = 3

[[marks]]
subject = "физика"
value = 80
kind = "test"

[[marks]]
subject = "физика"
value = 100
kind = "test"
"#;

    #[test]
    fn parse_inline_session() {
        let session = parse_session_str(INLINE_SESSION, Path::new("s.toml")).unwrap();
        assert_eq!(session.first_name, Value::String("Иван".into()));
        assert_eq!(
            session.subjects,
            SubjectList::Inline(vec!["математика".into(), "физика".into()])
        );
        assert_eq!(session.marks.len(), 5);
        assert_eq!(session.marks[0].kind, MarkKind::Grade);
        assert_eq!(session.marks[3].kind, MarkKind::Test);
    }

    #[test]
    fn run_inline_session() {
        let session = parse_session_str(INLINE_SESSION, Path::new("s.toml")).unwrap();
        let outcome = session.run(true).unwrap();
        assert!(outcome.rejected.is_empty());

        let record = outcome.record;
        let avg = record.grade_average().unwrap();
        assert!((avg - 11.0 / 3.0).abs() < 1e-12);
        assert_eq!(record.test_average("физика"), Some(90.0));
        assert_eq!(record.test_average("математика"), None);
    }

    #[test]
    fn subjects_file_is_resolved_relative_to_session() {
        let toml = r#"
[student]
first_name = "Anna"
middle_name = "Maria"
last_name = "Smith"
subjects_file = "lessons.csv"
"#;
        let session = parse_session_str(toml, Path::new("/data/sessions/s.toml")).unwrap();
        assert_eq!(
            session.subjects,
            SubjectList::File(PathBuf::from("/data/sessions/lessons.csv"))
        );
    }

    #[test]
    fn run_with_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lessons.csv"), "math,1\nphysics,2\n").unwrap();
        let session_path = dir.path().join("session.toml");
        std::fs::write(
            &session_path,
            r#"
[student]
first_name = "Anna"
middle_name = "Maria"
last_name = "Smith"
subjects_file = "lessons.csv"

[[marks]]
subject = "physics"
value = 4
"#,
        )
        .unwrap();

        let session = parse_session(&session_path).unwrap();
        let outcome = session.run(true).unwrap();
        assert_eq!(outcome.record.grade_average(), Some(4.0));
        assert_eq!(outcome.record.roster().unwrap().len(), 2);
    }

    #[test]
    fn subjects_source_is_required() {
        let toml = r#"
[student]
first_name = "Anna"
middle_name = "Maria"
last_name = "Smith"
"#;
        let err = parse_session_str(toml, Path::new("s.toml")).unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn non_text_name_fails_run() {
        let toml = r#"
[student]
first_name = 42
middle_name = "Maria"
last_name = "Smith"
subjects = ["math"]
"#;
        let session = parse_session_str(toml, Path::new("s.toml")).unwrap();
        let err = session.run(true).unwrap_err();
        assert!(format!("{err:#}").contains("must be text"));
    }

    #[test]
    fn strict_run_stops_at_bad_mark() {
        let toml = r#"
[student]
first_name = "Anna"
middle_name = "Maria"
last_name = "Smith"
subjects = ["math"]

[[marks]]
subject = "math"
value = 7
"#;
        let session = parse_session_str(toml, Path::new("s.toml")).unwrap();
        let err = session.run(true).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("mark #1"), "{msg}");
        assert!(msg.contains("outside allowed range 2-5"), "{msg}");
    }

    #[test]
    fn lenient_run_skips_bad_marks() {
        let toml = r#"
[student]
first_name = "Anna"
middle_name = "Maria"
last_name = "Smith"
subjects = ["math"]

[[marks]]
subject = "math"
value = 4

[[marks]]
subject = "chemistry"
value = 5

[[marks]]
subject = "math"
value = 101
kind = "test"
"#;
        let session = parse_session_str(toml, Path::new("s.toml")).unwrap();
        let outcome = session.run(false).unwrap();
        assert_eq!(outcome.rejected.len(), 2);
        assert_eq!(outcome.rejected[0].position, 2);
        assert_eq!(outcome.rejected[1].position, 3);
        assert_eq!(outcome.record.grade_average(), Some(4.0));
        assert_eq!(outcome.record.test_average("math"), None);
    }

    #[test]
    fn validate_reports_unknown_subjects_and_ranges() {
        let toml = r#"
[student]
first_name = "Anna"
middle_name = "Maria"
last_name = "Smith"
subjects = ["math"]

[[marks]]
subject = "chemistry"
value = 4

[[marks]]
subject = "math"
value = 1
"#;
        let session = parse_session_str(toml, Path::new("s.toml")).unwrap();
        let warnings = validate_session(&session);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].position, Some(1));
        assert!(warnings[0].message.contains("not in the subject list"));
        assert_eq!(warnings[1].position, Some(2));
        assert!(warnings[1].message.contains("outside allowed range"));
    }

    #[test]
    fn validate_reports_invalid_names() {
        let toml = r#"
[student]
first_name = "иван"
middle_name = 7
last_name = "Иванов"
subjects = ["математика"]
"#;
        let session = parse_session_str(toml, Path::new("s.toml")).unwrap();
        let warnings = validate_session(&session);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.position.is_none()));
        assert!(warnings[0].message.contains("first_name"));
        assert!(warnings[0].message.contains("uppercase"));
        assert!(warnings[1].message.contains("must be text"));
        assert!(session.run(true).is_err());
    }

    #[test]
    fn validate_empty_subject_list() {
        let toml = r#"
[student]
first_name = "Anna"
middle_name = "Maria"
last_name = "Smith"
subjects = []
"#;
        let session = parse_session_str(toml, Path::new("s.toml")).unwrap();
        let warnings = validate_session(&session);
        assert!(warnings.iter().any(|w| w.message.contains("empty")));
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_session_str("[student\nfirst_name =", Path::new("bad.toml"));
        assert!(result.is_err());
    }
}
