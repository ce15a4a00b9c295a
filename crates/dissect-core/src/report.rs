//! Session report with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::RoundResult;
use crate::session::SessionState;
use crate::statistics::{compute_session_stats, SessionStats};

/// A snapshot of a finished (or paused) session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Session identifier.
    pub id: Uuid,
    /// When the session was created.
    pub started_at: DateTime<Utc>,
    /// When the report was taken.
    pub created_at: DateTime<Utc>,
    /// Picker seed, if the session was seeded.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Rounds advanced past at snapshot time.
    pub rounds_played: u32,
    /// Cumulative score.
    pub score: u32,
    /// Completed rounds, oldest first.
    pub history: Vec<RoundResult>,
    /// Aggregate statistics over `history`.
    pub stats: SessionStats,
}

impl SessionReport {
    pub fn from_session(session: &SessionState, seed: Option<u64>) -> Self {
        Self {
            id: session.id(),
            started_at: session.started_at(),
            created_at: Utc::now(),
            seed,
            rounds_played: session.round_index(),
            score: session.score(),
            history: session.history().to_vec(),
            stats: compute_session_stats(session.history()),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use crate::engine::RoundEngine;
    use crate::picker::FixedPicker;
    use std::sync::Arc;

    fn played_session() -> SessionState {
        let mut engine = RoundEngine::new(
            Arc::new(ContentStore::builtin()),
            Box::new(FixedPicker::new("Results")),
        );
        let mut session = engine.new_session().unwrap();
        engine.submit_primary_guess(&mut session, "Results").unwrap();
        engine
            .submit_bonus_answer(&mut session, "Presents data and findings")
            .unwrap();
        engine.advance_round(&mut session).unwrap();
        session
    }

    #[test]
    fn snapshot_matches_session() {
        let session = played_session();
        let report = SessionReport::from_session(&session, Some(9));

        assert_eq!(report.id, session.id());
        assert_eq!(report.rounds_played, 1);
        assert_eq!(report.score, 2);
        assert_eq!(report.history.len(), 1);
        assert_eq!(report.stats.score, report.score);
        assert_eq!(report.seed, Some(9));
    }

    #[test]
    fn json_roundtrip() {
        let report = SessionReport::from_session(&played_session(), None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        report.save_json(&path).unwrap();
        let loaded = SessionReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.history, report.history);
        assert_eq!(loaded.stats, report.stats);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionReport::load_json(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read report"));
    }
}
