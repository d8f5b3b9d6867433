//! Read-only student summaries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot of a student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    /// First, middle and last name joined by spaces.
    pub full_name: String,
    /// Mean of every grade across every subject.
    pub grade_average: Option<f64>,
    /// One entry per subject, in roster order.
    pub subjects: Vec<SubjectSummary>,
}

/// Per-subject part of a [`StudentReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub name: String,
    pub grade_count: usize,
    pub test_count: usize,
    pub test_average: Option<f64>,
}

fn format_average(value: Option<f64>, precision: Option<usize>) -> String {
    match (value, precision) {
        (None, _) => "None".to_string(),
        (Some(v), Some(p)) => format!("{v:.p$}"),
        (Some(v), None) => format!("{v:?}"),
    }
}

impl StudentReport {
    fn render_text(&self, precision: Option<usize>) -> String {
        let mut out = String::new();
        out.push_str("Student\n");
        out.push_str(&format!("full_name=\"{}\",\n", self.full_name));
        out.push_str(&format!(
            "grade_average={}\n",
            format_average(self.grade_average, precision)
        ));
        for subject in &self.subjects {
            out.push_str(&format!(
                "{}={}\n",
                subject.name,
                format_average(subject.test_average, precision)
            ));
        }
        out
    }

    /// Plain-text rendering with averages rounded to `precision` decimals.
    pub fn to_text(&self, precision: usize) -> String {
        self.render_text(Some(precision))
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self, precision: usize) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.full_name));
        md.push_str(&format!(
            "**Grade average:** {}\n\n",
            format_average(self.grade_average, Some(precision))
        ));

        if !self.subjects.is_empty() {
            md.push_str("| Subject | Grades | Tests | Test average |\n");
            md.push_str("|---------|--------|-------|--------------|\n");
            for s in &self.subjects {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    s.name,
                    s.grade_count,
                    s.test_count,
                    format_average(s.test_average, Some(precision))
                ));
            }
        }

        md
    }
}

impl fmt::Display for StudentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(None))
    }
}
