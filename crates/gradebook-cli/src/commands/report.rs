//! The `gradebook report` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use gradebook_core::session::parse_session;
use gradebook_core::StudentReport;

use crate::config::{load_config_from, OutputFormat};

pub fn execute(
    session_path: PathBuf,
    format: Option<String>,
    precision: Option<usize>,
    lenient: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let format = match format {
        Some(f) => f.parse::<OutputFormat>().map_err(|e| anyhow::anyhow!("{}", e))?,
        None => config.format,
    };
    let precision = precision.unwrap_or(config.precision);
    let strict = config.strict && !lenient;

    let session = parse_session(&session_path)?;
    let outcome = session.run(strict)?;
    let report = outcome.record.report();

    match format {
        OutputFormat::Text => print!("{}", report.to_text(precision)),
        OutputFormat::Table => println!("{}", render_table(&report, precision)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Markdown => print!("{}", report.to_markdown(precision)),
    }

    if !outcome.rejected.is_empty() {
        eprintln!("\n{} mark(s) skipped:", outcome.rejected.len());
        for r in &outcome.rejected {
            eprintln!("  #{} {}: {}", r.position, r.mark.subject, r.reason);
        }
    }

    Ok(())
}

fn render_table(report: &StudentReport, precision: usize) -> Table {
    let average = |v: Option<f64>| {
        v.map(|v| format!("{v:.precision$}"))
            .unwrap_or_else(|| "-".to_string())
    };

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Grades", "Tests", "Test average"]);
    for s in &report.subjects {
        table.add_row(vec![
            s.name.clone(),
            s.grade_count.to_string(),
            s.test_count.to_string(),
            average(s.test_average),
        ]);
    }
    table.add_row(vec![
        format!("{} (grade average)", report.full_name),
        String::new(),
        String::new(),
        average(report.grade_average),
    ]);
    table
}
