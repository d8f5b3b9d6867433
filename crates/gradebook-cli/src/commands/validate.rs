//! The `gradebook validate` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::session::{parse_session, validate_session, SubjectList};

pub fn execute(session_path: PathBuf) -> Result<()> {
    let mut session = parse_session(&session_path)?;

    // Check marks against the real subject list, not just the file name.
    if matches!(session.subjects, SubjectList::File(_)) {
        let mut names = session.source().subject_names()?;
        let mut seen = HashSet::new();
        names.retain(|n| seen.insert(n.clone()));
        session.subjects = SubjectList::Inline(names);
    }

    let subject_count = match &session.subjects {
        SubjectList::Inline(names) => names.len(),
        SubjectList::File(_) => 0,
    };
    println!(
        "Session: {} ({} subjects, {} marks)",
        session_path.display(),
        subject_count,
        session.marks.len()
    );

    let warnings = validate_session(&session);
    for w in &warnings {
        let prefix = w
            .position
            .map(|p| format!("  [mark #{p}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Session valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
