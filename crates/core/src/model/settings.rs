use thiserror::Error;

use crate::model::problem::Difficulty;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("time limit must be > 0 seconds")]
    InvalidTimeLimit,

    #[error("questions per round must be > 0")]
    InvalidQuestionCount,

    #[error("option count must be at least 2")]
    InvalidOptionCount,
}

//
// ─── ROUND SETTINGS ────────────────────────────────────────────────────────────
//

/// Configuration for a single round, supplied by the caller when a round
/// starts. Immutable for the lifetime of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSettings {
    time_limit_secs: u32,
    questions_per_round: u32,
    option_count: u32,
    difficulty: Difficulty,
}

impl RoundSettings {
    /// Arcade defaults: a 60 second round of 10 four-option questions at
    /// medium difficulty.
    #[must_use]
    pub fn default_arcade() -> Self {
        Self {
            time_limit_secs: 60,
            questions_per_round: 10,
            option_count: 4,
            difficulty: Difficulty::Medium,
        }
    }

    /// Creates custom round settings.
    ///
    /// # Errors
    ///
    /// Returns a `SettingsError` when the time limit or question count is
    /// zero, or fewer than two options are requested.
    pub fn new(
        time_limit_secs: u32,
        questions_per_round: u32,
        option_count: u32,
        difficulty: Difficulty,
    ) -> Result<Self, SettingsError> {
        if time_limit_secs == 0 {
            return Err(SettingsError::InvalidTimeLimit);
        }
        if questions_per_round == 0 {
            return Err(SettingsError::InvalidQuestionCount);
        }
        if option_count < 2 {
            return Err(SettingsError::InvalidOptionCount);
        }

        Ok(Self {
            time_limit_secs,
            questions_per_round,
            option_count,
            difficulty,
        })
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn questions_per_round(&self) -> u32 {
        self.questions_per_round
    }

    #[must_use]
    pub fn option_count(&self) -> u32 {
        self.option_count
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
