use std::sync::Arc;

use rand::Rng;

use quiz_core::Clock;
use quiz_core::model::{RoundRecord, RoundSettings};
use quiz_core::scoring::ScoringPolicy;
use storage::{HistoryRepository, ProgressRepository};

use crate::error::RoundError;
use crate::problems::{self, Question};

use super::session::{AnswerOutcome, RoundSession};

/// Result of answering a single question in a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundAnswerResult {
    pub outcome: AnswerOutcome,
    pub is_complete: bool,
    pub record: Option<RoundRecord>,
}

/// Orchestrates round start, answering, and persisted completion.
///
/// Owns the clock and the persistence collaborators; sessions it hands out
/// stay pure state machines. When a session completes under this service,
/// its record is appended to history and folded into global progress.
#[derive(Clone)]
pub struct RoundLoopService {
    clock: Clock,
    history: Arc<dyn HistoryRepository>,
    progress: Arc<dyn ProgressRepository>,
    policy: ScoringPolicy,
}

impl RoundLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        history: Arc<dyn HistoryRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            history,
            progress,
            policy: ScoringPolicy::new(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Starts a round: samples a unique problem batch, pre-generates the
    /// choice sets, and starts the session timer.
    ///
    /// A short batch is tolerated (the round simply has fewer questions).
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Empty` if sampling produced nothing at all, and
    /// propagates choice-generation failures.
    pub fn start_round(
        &self,
        round: u32,
        settings: RoundSettings,
    ) -> Result<RoundSession, RoundError> {
        let mut rng = rand::rng();
        self.start_round_with_rng(&mut rng, round, settings)
    }

    /// `start_round` with a caller-supplied source of randomness, for
    /// deterministic tests.
    ///
    /// # Errors
    ///
    /// See [`RoundLoopService::start_round`].
    pub fn start_round_with_rng(
        &self,
        rng: &mut impl Rng,
        round: u32,
        settings: RoundSettings,
    ) -> Result<RoundSession, RoundError> {
        let count = usize::try_from(settings.questions_per_round()).unwrap_or(usize::MAX);
        let range = settings.difficulty().factor_range();
        let batch = problems::sample_unique(rng, count, range);

        let option_count = usize::try_from(settings.option_count()).unwrap_or(usize::MAX);
        let mut questions = Vec::with_capacity(batch.len());
        for problem in &batch.problems {
            let choices = problems::generate_choices(rng, problem, option_count)?;
            questions.push(Question {
                problem: *problem,
                choices,
            });
        }

        let mut session = RoundSession::new(round, settings, self.policy, questions)?;
        session.start(self.clock.now())?;
        Ok(session)
    }

    /// Answers the current question; persists record and progress when the
    /// round completes.
    ///
    /// # Errors
    ///
    /// Propagates session state errors and persistence failures. A
    /// persistence failure leaves the session Completed with its record
    /// intact, so the caller can retry through the repositories.
    pub fn submit_answer(
        &self,
        session: &mut RoundSession,
        value: u32,
    ) -> Result<RoundAnswerResult, RoundError> {
        let outcome = session.submit_answer(value, self.clock.now())?;
        let record = self.finalize_if_complete(session)?;
        Ok(RoundAnswerResult {
            outcome,
            is_complete: session.is_complete(),
            record,
        })
    }

    /// Advances the round timer; persists record and progress if the timer
    /// expiring completed the round.
    ///
    /// # Errors
    ///
    /// Propagates session state errors and persistence failures.
    pub fn tick(
        &self,
        session: &mut RoundSession,
        delta_secs: f64,
    ) -> Result<Option<RoundRecord>, RoundError> {
        session.tick(delta_secs, self.clock.now())?;
        self.finalize_if_complete(session)
    }

    fn finalize_if_complete(
        &self,
        session: &RoundSession,
    ) -> Result<Option<RoundRecord>, RoundError> {
        let Some(record) = session.record() else {
            return Ok(None);
        };

        self.history.append(record)?;
        let progress = self.progress.load_progress()?.after_round(record);
        self.progress.save_progress(progress)?;

        log::info!(
            "round {} completed: {} points, {}/{} correct",
            record.round(),
            record.points(),
            record.correct(),
            record.total()
        );
        Ok(Some(record.clone()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
