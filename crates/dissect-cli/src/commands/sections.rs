//! The `dissect sections` command.

use anyhow::Result;

use dissect_core::ContentStore;

pub fn execute(excerpts: bool) -> Result<()> {
    let store = ContentStore::builtin();

    println!("{} sections:", store.len());
    for (i, section) in store.sections().iter().enumerate() {
        println!(
            "  {}. {} ({} bonus options)",
            i + 1,
            section.name,
            section.bonus_options.len()
        );
        if excerpts {
            println!("     {}", section.excerpt_text);
        }
    }

    Ok(())
}
