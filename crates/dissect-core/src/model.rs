//! Core data model types for dissect.
//!
//! Section records are the static quiz content; round results are what a
//! session accumulates as the user plays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One named part of the source article together with its bonus question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Section name, unique within a content store.
    pub name: String,
    /// The excerpt shown to the user.
    pub excerpt_text: String,
    /// The bonus question asked after the primary guess.
    pub bonus_question: String,
    /// Bonus choices, in display order.
    pub bonus_options: Vec<String>,
    /// Must equal one of `bonus_options`.
    pub bonus_correct_answer: String,
    /// Shown after an answer is submitted.
    pub explanation: String,
}

impl SectionRecord {
    /// Whether `answer` matches the bonus answer exactly.
    pub fn is_bonus_correct(&self, answer: &str) -> bool {
        answer == self.bonus_correct_answer
    }
}

/// A completed round, appended to the session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based round number.
    pub round: u32,
    /// The user's primary guess.
    pub guess: String,
    /// The section the excerpt actually came from.
    pub correct_section: String,
    /// The user's bonus answer, absent if the bonus step was skipped.
    #[serde(default)]
    pub bonus_answer: Option<String>,
    /// The correct bonus answer for the round's section.
    pub bonus_correct_answer: String,
    /// Cumulative score when the round was recorded.
    pub score_after: u32,
}

impl RoundResult {
    pub fn primary_correct(&self) -> bool {
        self.guess == self.correct_section
    }

    pub fn bonus_correct(&self) -> bool {
        self.bonus_answer.as_deref() == Some(self.bonus_correct_answer.as_str())
    }
}

/// Where the current round stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user to name the section.
    AwaitingPrimaryGuess,
    /// Primary guess is in; the bonus question is open.
    AwaitingBonusAnswer { guess: String },
    /// The round result has been recorded; only an advance is accepted.
    RoundComplete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AwaitingPrimaryGuess => write!(f, "awaiting primary guess"),
            Phase::AwaitingBonusAnswer { .. } => write!(f, "awaiting bonus answer"),
            Phase::RoundComplete => write!(f, "round complete"),
        }
    }
}

/// Outcome of a primary guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryOutcome {
    pub correct: bool,
    pub correct_section: String,
    pub explanation: String,
}

/// Outcome of a bonus answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusOutcome {
    pub correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}
