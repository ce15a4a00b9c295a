//! The `dissect summary` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use dissect_core::report::SessionReport;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => {
            println!(
                "Session {} (started {})",
                report.id,
                report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            if let Some(seed) = report.seed {
                println!("Seed: {seed}");
            }

            let mut table = Table::new();
            table.set_header(vec!["Round", "Guess", "Section", "Bonus", "Score"]);
            for r in &report.history {
                let bonus = match (&r.bonus_answer, r.bonus_correct()) {
                    (None, _) => "skipped",
                    (Some(_), true) => "correct",
                    (Some(_), false) => "wrong",
                };
                table.add_row(vec![
                    Cell::new(r.round),
                    Cell::new(&r.guess),
                    Cell::new(&r.correct_section),
                    Cell::new(bonus),
                    Cell::new(r.score_after),
                ]);
            }
            println!("{table}");
            println!(
                "Score: {} | Rounds: {} | Sections named: {:.1}% | Bonus correct: {:.1}%",
                report.score,
                report.stats.rounds,
                report.stats.primary_accuracy * 100.0,
                report.stats.bonus_accuracy * 100.0
            );
        }
        other => anyhow::bail!("unknown format: '{other}' (expected text or json)"),
    }

    Ok(())
}
