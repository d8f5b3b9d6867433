//! The `gradebook init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("lessons.csv"), SAMPLE_SUBJECTS)?;
    write_if_missing(Path::new("session.toml"), SAMPLE_SESSION)?;

    println!("\nNext steps:");
    println!("  1. Edit session.toml with the student's names and marks");
    println!("  2. Run: gradebook validate --session session.toml");
    println!("  3. Run: gradebook report --session session.toml");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_SUBJECTS: &str = "русский язык
сопротивление материалов
физика
математика
концепции современного естествознания
";

const SAMPLE_SESSION: &str = r#"# gradebook session

[student]
first_name = "Иван"
middle_name = "Петрович"
last_name = "Иванов"
subjects_file = "lessons.csv"

[[marks]]
subject = "русский язык"
value = 3

[[marks]]
subject = "сопротивление материалов"
value = 5

[[marks]]
subject = "физика"
value = 2

[[marks]]
subject = "физика"
value = 4

[[marks]]
subject = "математика"
value = 5

[[marks]]
subject = "математика"
value = 68
kind = "test"

[[marks]]
subject = "математика"
value = 99
kind = "test"

[[marks]]
subject = "русский язык"
value = 29
kind = "test"

[[marks]]
subject = "концепции современного естествознания"
value = 74
kind = "test"
"#;
