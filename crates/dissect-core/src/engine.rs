//! The round engine.
//!
//! Drives one session through its rounds:
//! `AwaitingPrimaryGuess → AwaitingBonusAnswer → RoundComplete → (advance)`.
//! Every transition is an explicit call; nothing advances on its own.

use std::sync::Arc;

use crate::content::ContentStore;
use crate::error::QuizError;
use crate::model::{BonusOutcome, Phase, PrimaryOutcome, RoundResult, SectionRecord};
use crate::picker::SectionPicker;
use crate::session::SessionState;

/// Picks sections and scores answers against a content store.
pub struct RoundEngine {
    store: Arc<ContentStore>,
    picker: Box<dyn SectionPicker>,
}

impl RoundEngine {
    pub fn new(store: Arc<ContentStore>, picker: Box<dyn SectionPicker>) -> Self {
        Self { store, picker }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn picker_name(&self) -> &str {
        self.picker.name()
    }

    /// Create a session and pick its first section.
    pub fn new_session(&mut self) -> Result<SessionState, QuizError> {
        let first = self.choose_section()?;
        let session = SessionState::new(first);
        tracing::debug!(
            session = %session.id(),
            section = session.current_section(),
            picker = self.picker.name(),
            "session started"
        );
        Ok(session)
    }

    /// The section record behind the current excerpt.
    pub fn current_section(&self, session: &SessionState) -> Result<&SectionRecord, QuizError> {
        self.store.lookup(session.current_section())
    }

    /// Pick a fresh section for the round in play.
    ///
    /// Score and history are untouched. Only allowed before the primary
    /// guess, so an answered round cannot be reopened.
    pub fn start_round(&mut self, session: &mut SessionState) -> Result<&SectionRecord, QuizError> {
        if *session.phase() != Phase::AwaitingPrimaryGuess {
            return Err(reject(QuizError::AlreadyAnswered {
                round: session.round_number(),
            }));
        }
        let name = self.choose_section()?;
        self.begin_round(session, name)
    }

    /// Score the user's guess at which section the excerpt is from.
    pub fn submit_primary_guess(
        &self,
        session: &mut SessionState,
        guess: &str,
    ) -> Result<PrimaryOutcome, QuizError> {
        if *session.phase() != Phase::AwaitingPrimaryGuess {
            return Err(reject(QuizError::AlreadyAnswered {
                round: session.round_number(),
            }));
        }

        let section = self.store.lookup(session.current_section())?;
        let correct = guess == section.name;
        if correct {
            session.award_point();
        }
        session.set_phase(Phase::AwaitingBonusAnswer {
            guess: guess.to_string(),
        });

        Ok(PrimaryOutcome {
            correct,
            correct_section: section.name.clone(),
            explanation: section.explanation.clone(),
        })
    }

    /// Score the bonus answer and record the round.
    pub fn submit_bonus_answer(
        &self,
        session: &mut SessionState,
        answer: &str,
    ) -> Result<BonusOutcome, QuizError> {
        let guess = pending_guess(session)?;
        let section = self.store.lookup(session.current_section())?;

        let correct = section.is_bonus_correct(answer);
        if correct {
            session.award_point();
        }
        let result = session.record(
            guess,
            Some(answer.to_string()),
            section.bonus_correct_answer.clone(),
        );
        log_recorded(result);

        Ok(BonusOutcome {
            correct,
            correct_answer: section.bonus_correct_answer.clone(),
            explanation: section.explanation.clone(),
        })
    }

    /// Record the round without a bonus answer.
    pub fn skip_bonus<'s>(
        &self,
        session: &'s mut SessionState,
    ) -> Result<&'s RoundResult, QuizError> {
        let guess = pending_guess(session)?;
        let correct_answer = self
            .store
            .lookup(session.current_section())?
            .bonus_correct_answer
            .clone();
        let result = session.record(guess, None, correct_answer);
        log_recorded(result);
        Ok(result)
    }

    /// Move to the next round and pick its section.
    ///
    /// A pending bonus is recorded as skipped first.
    pub fn advance_round(
        &mut self,
        session: &mut SessionState,
    ) -> Result<&SectionRecord, QuizError> {
        if *session.phase() == Phase::AwaitingPrimaryGuess {
            return Err(reject(QuizError::GuessPending {
                round: session.round_number(),
            }));
        }

        let next = self.choose_section()?;
        if matches!(session.phase(), Phase::AwaitingBonusAnswer { .. }) {
            self.skip_bonus(session)?;
        }
        session.increment_round();
        self.begin_round(session, next)
    }

    fn choose_section(&mut self) -> Result<String, QuizError> {
        let names = self.store.section_names();
        let name = self.picker.pick(&names);
        self.store.lookup(&name)?;
        Ok(name)
    }

    fn begin_round(
        &self,
        session: &mut SessionState,
        name: String,
    ) -> Result<&SectionRecord, QuizError> {
        session.replace_section(name);
        tracing::debug!(
            round = session.round_number(),
            section = session.current_section(),
            "round started"
        );
        self.store.lookup(session.current_section())
    }
}

/// The primary guess of the open round, or why there is none.
fn pending_guess(session: &SessionState) -> Result<String, QuizError> {
    let round = session.round_number();
    match session.phase() {
        Phase::AwaitingBonusAnswer { guess } => Ok(guess.clone()),
        Phase::AwaitingPrimaryGuess => Err(reject(QuizError::GuessPending { round })),
        Phase::RoundComplete => Err(reject(QuizError::AlreadyAnswered { round })),
    }
}

fn reject(err: QuizError) -> QuizError {
    tracing::warn!("submission rejected: {err}");
    err
}

fn log_recorded(result: &RoundResult) {
    tracing::info!(
        round = result.round,
        guess = %result.guess,
        correct_section = %result.correct_section,
        bonus_answered = result.bonus_answer.is_some(),
        score = result.score_after,
        "round recorded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::{FixedPicker, ScriptedPicker};

    fn engine_with(picker: Box<dyn SectionPicker>) -> RoundEngine {
        RoundEngine::new(Arc::new(ContentStore::builtin()), picker)
    }

    #[test]
    fn correct_guess_scores_a_point() {
        let mut engine = engine_with(Box::new(FixedPicker::new("Results")));
        let mut session = engine.new_session().unwrap();

        let outcome = engine.submit_primary_guess(&mut session, "Results").unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.correct_section, "Results");
        assert_eq!(session.score(), 1);
        assert!(session.history().is_empty());
    }

    #[test]
    fn guess_is_case_sensitive_and_untrimmed() {
        let mut engine = engine_with(Box::new(FixedPicker::new("Results")));
        let mut session = engine.new_session().unwrap();

        let outcome = engine.submit_primary_guess(&mut session, "results ").unwrap();
        assert!(!outcome.correct);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn unknown_guess_is_just_wrong() {
        let mut engine = engine_with(Box::new(FixedPicker::new("Abstract")));
        let mut session = engine.new_session().unwrap();

        let outcome = engine.submit_primary_guess(&mut session, "Appendix").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_section, "Abstract");
    }

    #[test]
    fn bonus_before_guess_is_pending() {
        let mut engine = engine_with(Box::new(FixedPicker::new("Methods")));
        let mut session = engine.new_session().unwrap();

        let err = engine
            .submit_bonus_answer(&mut session, "Describing survey results")
            .unwrap_err();
        assert_eq!(err, QuizError::GuessPending { round: 1 });
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn second_guess_while_bonus_open_is_rejected() {
        let mut engine = engine_with(Box::new(FixedPicker::new("Methods")));
        let mut session = engine.new_session().unwrap();

        engine.submit_primary_guess(&mut session, "Results").unwrap();
        let err = engine.submit_primary_guess(&mut session, "Methods").unwrap_err();
        assert_eq!(err, QuizError::AlreadyAnswered { round: 1 });
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn skip_bonus_records_absent_answer() {
        let mut engine = engine_with(Box::new(FixedPicker::new("Discussion")));
        let mut session = engine.new_session().unwrap();

        engine.submit_primary_guess(&mut session, "Discussion").unwrap();
        let result = engine.skip_bonus(&mut session).unwrap().clone();
        assert_eq!(result.bonus_answer, None);
        assert_eq!(result.bonus_correct_answer, "To connect results to larger theories");
        assert_eq!(result.score_after, 1);
        assert_eq!(session.phase(), &Phase::RoundComplete);
    }

    #[test]
    fn advance_before_guess_is_rejected() {
        let mut engine = engine_with(Box::new(FixedPicker::new("Methods")));
        let mut session = engine.new_session().unwrap();

        let err = engine.advance_round(&mut session).unwrap_err();
        assert_eq!(err, QuizError::GuessPending { round: 1 });
        assert_eq!(session.round_index(), 0);
    }

    #[test]
    fn advance_with_bonus_open_records_skip() {
        let mut engine = engine_with(Box::new(ScriptedPicker::new(["Methods", "Abstract"])));
        let mut session = engine.new_session().unwrap();

        engine.submit_primary_guess(&mut session, "Methods").unwrap();
        let next = engine.advance_round(&mut session).unwrap();
        assert_eq!(next.name, "Abstract");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].bonus_answer, None);
        assert_eq!(session.round_index(), 1);
        assert_eq!(session.phase(), &Phase::AwaitingPrimaryGuess);
    }

    #[test]
    fn start_round_rerolls_only_before_guess() {
        let mut engine = engine_with(Box::new(ScriptedPicker::new(["Methods", "Results"])));
        let mut session = engine.new_session().unwrap();

        let rolled = engine.start_round(&mut session).unwrap();
        assert_eq!(rolled.name, "Results");
        assert_eq!(session.round_index(), 0);

        engine.submit_primary_guess(&mut session, "Results").unwrap();
        assert!(matches!(
            engine.start_round(&mut session),
            Err(QuizError::AlreadyAnswered { round: 1 })
        ));
        assert_eq!(session.current_section(), "Results");
    }

    #[test]
    fn picker_outside_store_is_not_found() {
        let mut engine = engine_with(Box::new(FixedPicker::new("Appendix")));
        let err = engine.new_session().unwrap_err();
        assert_eq!(err, QuizError::NotFound("Appendix".into()));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn failed_advance_leaves_session_untouched() {
        let mut engine = engine_with(Box::new(ScriptedPicker::new(["Methods", "Appendix"])));
        let mut session = engine.new_session().unwrap();

        engine.submit_primary_guess(&mut session, "Methods").unwrap();
        assert!(engine.advance_round(&mut session).is_err());
        assert_eq!(session.round_index(), 0);
        assert!(session.history().is_empty());
        assert!(matches!(session.phase(), Phase::AwaitingBonusAnswer { .. }));
    }
}
