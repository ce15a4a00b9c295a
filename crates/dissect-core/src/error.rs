//! Quiz error types.
//!
//! Every failure a round engine operation can report. The CLI matches on
//! these to decide whether to keep the session running or abort.

use thiserror::Error;

/// Errors that can occur while playing or exporting a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// A section name was looked up that the content store does not hold.
    #[error("section not found: {0}")]
    NotFound(String),

    /// Export was requested before any round was completed.
    #[error("no completed rounds to export")]
    EmptyHistory,

    /// The round already has an answer recorded for this step.
    #[error("round {round} has already been answered")]
    AlreadyAnswered { round: u32 },

    /// A bonus answer or advance came before the primary guess.
    #[error("round {round} has no primary guess yet")]
    GuessPending { round: u32 },

    /// The content table breaks one of its invariants.
    #[error("invalid content: {0}")]
    InvalidContent(String),
}

impl QuizError {
    /// Returns `true` if the session can carry on after this error.
    ///
    /// `NotFound` and `InvalidContent` point at broken content and are fatal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, QuizError::NotFound(_) | QuizError::InvalidContent(_))
    }
}
