//! The `dissect init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("dissect.toml");
    if path.exists() {
        println!("dissect.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created dissect.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit dissect.toml to pick an export directory or a fixed seed");
    println!("  2. Run: dissect play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# dissect configuration

# Fixed seed for reproducible rounds; remove for a fresh shuffle each session.
# seed = 42

output_dir = "."
export_filename = "facebook_game_results.csv"
show_hints = true
offer_bonus = true
"#;
