//! Aggregate statistics over a session history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::RoundResult;

/// Totals for a whole session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Completed rounds.
    pub rounds: u32,
    /// Rounds where the section was named correctly.
    pub primary_correct: u32,
    /// Rounds where a bonus answer was given.
    pub bonus_answered: u32,
    /// Rounds where the bonus answer was correct.
    pub bonus_correct: u32,
    /// Final score, equal to `primary_correct + bonus_correct`.
    pub score: u32,
    /// Primary accuracy (0.0–1.0).
    pub primary_accuracy: f64,
    /// Bonus accuracy over answered bonuses (0.0–1.0).
    pub bonus_accuracy: f64,
    /// Breakdown by section name.
    pub per_section: BTreeMap<String, SectionStats>,
}

/// Totals for rounds drawn from one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStats {
    pub rounds: u32,
    pub primary_correct: u32,
    pub bonus_correct: u32,
}

/// Compute session statistics from its history.
pub fn compute_session_stats(history: &[RoundResult]) -> SessionStats {
    let mut stats = SessionStats::default();

    for r in history {
        stats.rounds += 1;
        let entry = stats
            .per_section
            .entry(r.correct_section.clone())
            .or_default();
        entry.rounds += 1;

        if r.primary_correct() {
            stats.primary_correct += 1;
            entry.primary_correct += 1;
        }
        if r.bonus_answer.is_some() {
            stats.bonus_answered += 1;
        }
        if r.bonus_correct() {
            stats.bonus_correct += 1;
            entry.bonus_correct += 1;
        }
    }

    stats.score = stats.primary_correct + stats.bonus_correct;
    stats.primary_accuracy = ratio(stats.primary_correct, stats.rounds);
    stats.bonus_accuracy = ratio(stats.bonus_correct, stats.bonus_answered);
    stats
}

fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
