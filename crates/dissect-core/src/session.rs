//! Per-session round state.
//!
//! A `SessionState` is created by [`RoundEngine::new_session`] and only
//! changes through engine operations. Score never decreases and history is
//! append-only.
//!
//! [`RoundEngine::new_session`]: crate::engine::RoundEngine::new_session

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{Phase, RoundResult};

/// The live state of one quiz session.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    started_at: DateTime<Utc>,
    round_index: u32,
    score: u32,
    current_section: String,
    phase: Phase,
    history: Vec<RoundResult>,
}

impl SessionState {
    pub(crate) fn new(first_section: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            round_index: 0,
            score: 0,
            current_section: first_section,
            phase: Phase::AwaitingPrimaryGuess,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Number of rounds advanced past.
    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    /// The 1-based number of the round in play.
    pub fn round_number(&self) -> u32 {
        self.round_index + 1
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Name of the section the current excerpt comes from.
    pub fn current_section(&self) -> &str {
        &self.current_section
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn history(&self) -> &[RoundResult] {
        &self.history
    }

    /// Rounds with a recorded result.
    pub fn rounds_completed(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn award_point(&mut self) {
        self.score += 1;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn replace_section(&mut self, section: String) {
        self.current_section = section;
        self.phase = Phase::AwaitingPrimaryGuess;
    }

    pub(crate) fn increment_round(&mut self) {
        self.round_index += 1;
    }

    /// Record the current round and close it.
    pub(crate) fn record(
        &mut self,
        guess: String,
        bonus_answer: Option<String>,
        bonus_correct_answer: String,
    ) -> &RoundResult {
        let result = RoundResult {
            round: self.round_number(),
            guess,
            correct_section: self.current_section.clone(),
            bonus_answer,
            bonus_correct_answer,
            score_after: self.score,
        };
        self.history.push(result);
        self.phase = Phase::RoundComplete;
        &self.history[self.history.len() - 1]
    }
}
