use std::fmt;

use chrono::{DateTime, Utc};

use quiz_core::model::{RecordError, RoundRecord, RoundSettings};
use quiz_core::scoring::ScoringPolicy;
use quiz_core::time::format_timestamp;

use crate::error::RoundError;
use crate::problems::Question;

use super::progress::RoundProgress;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Lifecycle phase of a round. Completed and Abandoned are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    InProgress,
    Completed,
    Abandoned,
}

//
// ─── ANSWER OUTCOME ────────────────────────────────────────────────────────────
//

/// Result of submitting one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub points_awarded: u32,
    pub correct_answer: u32,
    pub is_complete: bool,
}

//
// ─── ROUND SESSION ─────────────────────────────────────────────────────────────
//

/// In-memory state machine for one timed round.
///
/// Steps through a pre-assembled question list, scoring each answer with
/// the per-question time accumulated from `tick` deltas. The round closes
/// when the question list is exhausted or the timer runs out, whichever
/// comes first, and emits its `RoundRecord` exactly once. Single-writer:
/// exactly one caller drives `submit_answer`/`tick` for a session.
pub struct RoundSession {
    round: u32,
    settings: RoundSettings,
    policy: ScoringPolicy,
    questions: Vec<Question>,
    current: usize,
    phase: RoundPhase,
    paused: bool,
    remaining_secs: f64,
    question_elapsed_secs: f64,
    score: u32,
    correct: usize,
    answered: usize,
    record: Option<RoundRecord>,
    started_at: Option<DateTime<Utc>>,
}

impl RoundSession {
    /// Creates an idle session over a pre-assembled question list.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Empty` if no questions are provided, or
    /// `RecordError::InvalidRound` (wrapped) for round index zero.
    pub fn new(
        round: u32,
        settings: RoundSettings,
        policy: ScoringPolicy,
        questions: Vec<Question>,
    ) -> Result<Self, RoundError> {
        if round == 0 {
            return Err(RecordError::InvalidRound.into());
        }
        if questions.is_empty() {
            return Err(RoundError::Empty);
        }

        Ok(Self {
            round,
            settings,
            policy,
            questions,
            current: 0,
            phase: RoundPhase::Idle,
            paused: false,
            remaining_secs: f64::from(settings.time_limit_secs()),
            question_elapsed_secs: 0.0,
            score: 0,
            correct: 0,
            answered: 0,
            record: None,
            started_at: None,
        })
    }

    /// Begins the round: Idle → InProgress, counters and timer reset.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::AlreadyStarted` outside Idle.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Idle {
            return Err(RoundError::AlreadyStarted);
        }

        self.phase = RoundPhase::InProgress;
        self.paused = false;
        self.current = 0;
        self.score = 0;
        self.correct = 0;
        self.answered = 0;
        self.remaining_secs = f64::from(self.settings.time_limit_secs());
        self.question_elapsed_secs = 0.0;
        self.started_at = Some(now);
        Ok(())
    }

    /// Scores an answer against the current question and advances.
    ///
    /// Counters only move once scoring has succeeded; an invalid-state call
    /// leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NotStarted`/`RoundError::Finished` outside
    /// InProgress, and propagates scoring or record-building failures.
    pub fn submit_answer(
        &mut self,
        value: u32,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome, RoundError> {
        self.ensure_in_progress()?;

        let Some(question) = self.questions.get(self.current) else {
            return Err(RoundError::Finished);
        };
        let correct_answer = question.problem.answer();
        let correct = value == correct_answer;
        let points = self.policy.points_for(
            self.settings.difficulty(),
            self.question_elapsed_secs,
            correct,
        )?;

        self.answered += 1;
        if correct {
            self.correct += 1;
        }
        self.score = self.score.saturating_add(points);
        self.current += 1;
        self.question_elapsed_secs = 0.0;

        let is_complete = self.current >= self.questions.len();
        if is_complete {
            self.complete(now)?;
        }

        Ok(AnswerOutcome {
            correct,
            points_awarded: points,
            correct_answer,
            is_complete,
        })
    }

    /// Advances gameplay time by `delta_secs`.
    ///
    /// While paused no time accrues, but the call is accepted: an external
    /// scheduler keeps its cadence regardless of pause state. When the
    /// timer reaches zero the round completes with whatever was tallied,
    /// even mid-question.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::InvalidTick` for negative or non-finite deltas,
    /// and invalid-state errors outside InProgress.
    pub fn tick(&mut self, delta_secs: f64, now: DateTime<Utc>) -> Result<(), RoundError> {
        self.ensure_in_progress()?;
        if !delta_secs.is_finite() || delta_secs < 0.0 {
            return Err(RoundError::InvalidTick(delta_secs));
        }
        if self.paused {
            return Ok(());
        }

        self.remaining_secs -= delta_secs;
        self.question_elapsed_secs += delta_secs;

        if self.remaining_secs <= 0.0 {
            self.remaining_secs = 0.0;
            self.complete(now)?;
        }
        Ok(())
    }

    /// Freezes time accrual. No-op outside InProgress.
    pub fn pause(&mut self) {
        if self.phase == RoundPhase::InProgress {
            self.paused = true;
        }
    }

    /// Unfreezes time accrual. No-op outside InProgress.
    pub fn resume(&mut self) {
        if self.phase == RoundPhase::InProgress {
            self.paused = false;
        }
    }

    /// Abandons the round without emitting a record.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Finished` if the round already ended.
    pub fn abandon(&mut self) -> Result<(), RoundError> {
        match self.phase {
            RoundPhase::Idle | RoundPhase::InProgress => {
                self.phase = RoundPhase::Abandoned;
                Ok(())
            }
            RoundPhase::Completed | RoundPhase::Abandoned => Err(RoundError::Finished),
        }
    }

    fn ensure_in_progress(&self) -> Result<(), RoundError> {
        match self.phase {
            RoundPhase::InProgress => Ok(()),
            RoundPhase::Idle => Err(RoundError::NotStarted),
            RoundPhase::Completed | RoundPhase::Abandoned => Err(RoundError::Finished),
        }
    }

    fn complete(&mut self, now: DateTime<Utc>) -> Result<(), RoundError> {
        let correct = u32::try_from(self.correct)
            .map_err(|_| RecordError::CountOverflow { len: self.correct })?;
        let total = u32::try_from(self.answered)
            .map_err(|_| RecordError::CountOverflow { len: self.answered })?;

        let record = RoundRecord::new(
            self.round,
            self.score,
            correct,
            total,
            format_timestamp(now),
        )?;
        self.record = Some(record);
        self.phase = RoundPhase::Completed;
        Ok(())
    }

    //
    // ─── VIEWS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == RoundPhase::Completed
    }

    /// The question awaiting an answer, while the round runs.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != RoundPhase::InProgress {
            return None;
        }
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct
    }

    /// Running accuracy over the answers given so far.
    #[must_use]
    pub fn accuracy_percent(&self) -> u8 {
        let correct = u32::try_from(self.correct).unwrap_or(u32::MAX);
        let answered = u32::try_from(self.answered).unwrap_or(u32::MAX);
        ScoringPolicy::accuracy_percent(correct, answered)
    }

    /// Returns a summary of the current round progress.
    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        RoundProgress {
            total: self.questions.len(),
            answered: self.answered,
            correct: self.correct,
            remaining: self.questions.len().saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    /// The record emitted at completion; `None` until then, and always
    /// `None` for abandoned rounds.
    #[must_use]
    pub fn record(&self) -> Option<&RoundRecord> {
        self.record.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }
}

impl fmt::Debug for RoundSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundSession")
            .field("round", &self.round)
            .field("phase", &self.phase)
            .field("paused", &self.paused)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("correct", &self.correct)
            .field("answered", &self.answered)
            .field("remaining_secs", &self.remaining_secs)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
