//! The `gradebook check-name` command.

use anyhow::Result;

use gradebook_core::name::{validate_name, NameKind};

pub fn execute(value: String, field: String) -> Result<()> {
    let kind = match field.to_lowercase().as_str() {
        "first" | "first_name" => NameKind::First,
        "middle" | "middle_name" => NameKind::Middle,
        "last" | "last_name" => NameKind::Last,
        other => anyhow::bail!("unknown name field: {other}"),
    };

    validate_name(kind, &value)?;
    println!("ok");
    Ok(())
}
