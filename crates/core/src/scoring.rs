use thiserror::Error;

use crate::model::Difficulty;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("elapsed seconds must be non-negative and finite, got {provided}")]
    InvalidElapsed { provided: f64 },

    #[error("time cap must be non-negative and finite, got {provided}")]
    InvalidTimeCap { provided: f64 },
}

//
// ─── SCORING POLICY ────────────────────────────────────────────────────────────
//

/// Converts correctness, response time, and difficulty into points.
///
/// A correct answer earns the difficulty's base points plus a time bonus of
/// one point per unspent second under the cap; the bonus floors at zero for
/// slow answers. Incorrect answers always score zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    time_cap_secs: f64,
}

impl ScoringPolicy {
    /// Seconds after which the time bonus has fully decayed.
    pub const DEFAULT_TIME_CAP_SECS: f64 = 10.0;

    #[must_use]
    pub fn new() -> Self {
        Self {
            time_cap_secs: Self::DEFAULT_TIME_CAP_SECS,
        }
    }

    /// Creates a policy with a custom time bonus cap.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidTimeCap` if the cap is negative or
    /// non-finite.
    pub fn with_time_cap(time_cap_secs: f64) -> Result<Self, ScoringError> {
        if !time_cap_secs.is_finite() || time_cap_secs < 0.0 {
            return Err(ScoringError::InvalidTimeCap {
                provided: time_cap_secs,
            });
        }
        Ok(Self { time_cap_secs })
    }

    #[must_use]
    pub fn time_cap_secs(&self) -> f64 {
        self.time_cap_secs
    }

    /// Points for one answered question.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidElapsed` if `elapsed_secs` is negative
    /// or non-finite.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn points_for(
        &self,
        difficulty: Difficulty,
        elapsed_secs: f64,
        correct: bool,
    ) -> Result<u32, ScoringError> {
        if !elapsed_secs.is_finite() || elapsed_secs < 0.0 {
            return Err(ScoringError::InvalidElapsed {
                provided: elapsed_secs,
            });
        }
        if !correct {
            return Ok(0);
        }

        let bonus = (self.time_cap_secs - elapsed_secs).max(0.0);
        Ok(difficulty.base_points() + bonus.floor() as u32)
    }

    /// Share of correct answers as a whole percentage; an empty round is 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn accuracy_percent(correct: u32, total: u32) -> u8 {
        if total == 0 {
            return 0;
        }
        (f64::from(correct) * 100.0 / f64::from(total)).round() as u8
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::new()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
