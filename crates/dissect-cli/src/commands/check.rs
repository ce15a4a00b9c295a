//! The `dissect check` command.

use anyhow::Result;

use dissect_core::content::validate_sections;
use dissect_core::ContentStore;

pub fn execute() -> Result<()> {
    let store = ContentStore::builtin();
    println!("Content store: {} sections", store.len());

    let warnings = validate_sections(store.sections());
    for w in &warnings {
        let prefix = w
            .section
            .as_ref()
            .map(|name| format!("  [{name}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    anyhow::ensure!(
        warnings.is_empty(),
        "{} content problem(s) found",
        warnings.len()
    );
    println!("All sections valid.");
    Ok(())
}
