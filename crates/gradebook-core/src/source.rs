//! Subject sources.
//!
//! A [`SubjectSource`] yields the subject names a roster is built from. The
//! CSV source reads the first column of every row of a text file.

use std::path::{Path, PathBuf};

use crate::error::RecordError;

/// Something that can list the subjects a student is enrolled in.
pub trait SubjectSource {
    /// Human-readable description of where the names come from.
    fn origin(&self) -> String;

    /// Subject names in source order. Duplicates are allowed; the roster
    /// keeps the first occurrence.
    fn subject_names(&self) -> Result<Vec<String>, RecordError>;
}

/// Subjects read from the first column of a comma-separated file.
#[derive(Debug, Clone)]
pub struct CsvSubjectSource {
    path: PathBuf,
}

impl CsvSubjectSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubjectSource for CsvSubjectSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn subject_names(&self) -> Result<Vec<String>, RecordError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| RecordError::Source {
            origin: self.origin(),
            reason: e.to_string(),
        })?;
        Ok(first_column(&content))
    }
}

/// Subjects given directly as a list.
#[derive(Debug, Clone, Default)]
pub struct InlineSubjects {
    names: Vec<String>,
}

impl InlineSubjects {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl SubjectSource for InlineSubjects {
    fn origin(&self) -> String {
        "inline subject list".to_string()
    }

    fn subject_names(&self) -> Result<Vec<String>, RecordError> {
        Ok(self.names.clone())
    }
}

/// Extract the first field of every CSV record.
///
/// Quoted fields may contain commas, newlines and `""` escapes. Rows end at
/// `\n`, `\r\n` or a lone `\r`. Blank rows and rows whose first field is
/// empty are skipped. Whitespace around the field is kept as-is.
pub fn first_column(content: &str) -> Vec<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut names = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_done = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    if !field_done {
                        field.push('"');
                    }
                } else {
                    in_quotes = false;
                }
            } else if !field_done {
                field.push(c);
            }
            continue;
        }

        match c {
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                if !field.is_empty() {
                    names.push(std::mem::take(&mut field));
                }
                field_done = false;
            }
            _ if field_done => {
                if c == '"' {
                    in_quotes = true;
                }
            }
            ',' => field_done = true,
            '"' if field.is_empty() => in_quotes = true,
            _ => field.push(c),
        }
    }

    if !field.is_empty() {
        names.push(field);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_column_plain_rows() {
        let csv = "математика,5\nфизика\nрусский язык,1,2\n";
        assert_eq!(
            first_column(csv),
            vec!["математика", "физика", "русский язык"]
        );
    }

    #[test]
    fn first_column_skips_blank_rows_and_crlf() {
        let csv = "\u{feff}история\r\n\r\n,orphan\r\nхимия";
        assert_eq!(first_column(csv), vec!["история", "химия"]);
    }

    #[test]
    fn first_column_quoted_fields() {
        let csv = "\"Law, Intro\",x\n\"He said \"\"hi\"\"\"\nplain,\"a,\nb\"\nlast\n";
        assert_eq!(
            first_column(csv),
            vec!["Law, Intro", "He said \"hi\"", "plain", "last"]
        );
    }

    #[test]
    fn first_column_ignores_escaped_quotes_in_later_fields() {
        assert_eq!(first_column("физика,\"x\"\"y\"\n"), vec!["физика"]);
        assert_eq!(first_column("a,\"\"\"\nb\"\nc\n"), vec!["a", "c"]);
        assert_eq!(
            first_column("физика,\"он сказал \"\"да\"\"\"\nхимия\n"),
            vec!["физика", "химия"]
        );
    }

    #[test]
    fn first_column_lone_carriage_return_ends_row() {
        assert_eq!(first_column("a\rb,1\r\rc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn first_column_keeps_surrounding_spaces() {
        assert_eq!(first_column(" math ,1\n"), vec![" math "]);
    }

    #[test]
    fn csv_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lessons.csv");
        std::fs::write(&path, "математика\nфизика\n").unwrap();

        let source = CsvSubjectSource::new(&path);
        assert_eq!(
            source.subject_names().unwrap(),
            vec!["математика", "физика"]
        );
    }

    #[test]
    fn csv_source_missing_file() {
        let source = CsvSubjectSource::new("/nonexistent/lessons.csv");
        let err = source.subject_names().unwrap_err();
        assert!(matches!(err, RecordError::Source { .. }));
        assert!(err.to_string().contains("lessons.csv"));
    }

    #[test]
    fn inline_subjects() {
        let source = InlineSubjects::new(["a", "b"]);
        assert_eq!(source.subject_names().unwrap(), vec!["a", "b"]);
    }
}
