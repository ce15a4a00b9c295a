//! CSV export of round history.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use dissect_core::config::DEFAULT_EXPORT_FILENAME;
use dissect_core::error::QuizError;
use dissect_core::model::RoundResult;

/// Column names, in output order.
pub const HEADER: [&str; 6] = [
    "round",
    "guess",
    "correct_section",
    "bonus_answer",
    "correct_bonus",
    "score",
];

/// MIME type the export is offered with.
pub const CSV_MIME: &str = "text/csv";

const LINE_END: &str = "\r\n";

/// A CSV document ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    rows: usize,
}

impl CsvDownload {
    /// Export `history` under the default file name.
    pub fn from_history(history: &[RoundResult]) -> Result<Self, QuizError> {
        Ok(Self {
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
            mime: CSV_MIME,
            bytes: export_history(history)?,
            rows: history.len(),
        })
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Number of data rows, excluding the header.
    pub fn row_count(&self) -> usize {
        self.rows
    }
}

/// Serialize `history` as UTF-8 CSV with a header row.
///
/// Fails with [`QuizError::EmptyHistory`] when no round has been completed.
pub fn export_history(history: &[RoundResult]) -> Result<Vec<u8>, QuizError> {
    if history.is_empty() {
        return Err(QuizError::EmptyHistory);
    }

    let mut out = String::new();
    push_record(&mut out, HEADER.iter().copied());

    for r in history {
        let round = r.round.to_string();
        let score = r.score_after.to_string();
        push_record(
            &mut out,
            [
                round.as_str(),
                r.guess.as_str(),
                r.correct_section.as_str(),
                r.bonus_answer.as_deref().unwrap_or(""),
                r.bonus_correct_answer.as_str(),
                score.as_str(),
            ],
        );
    }

    Ok(out.into_bytes())
}

/// Write the download into `dir`, returning the file path.
pub fn write_csv_export(download: &CsvDownload, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(&download.filename);
    std::fs::write(&path, &download.bytes)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        rows = download.row_count(),
        mime = download.mime,
        "export written"
    );
    Ok(path)
}

fn push_record<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str(LINE_END);
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field.contains([',', '"', '\r', '\n']);
    if !needs_quotes {
        out.push_str(field);
        return;
    }
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}
