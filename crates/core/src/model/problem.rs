use std::fmt;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("factor must be at least 1, got {0}")]
    FactorOutOfRange(u32),

    #[error("factor range is empty: min {min} > max {max}")]
    EmptyRange { min: u32, max: u32 },
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// A single multiplication question.
///
/// The answer is derived at construction and the value never changes
/// afterwards; sessions consume a problem and discard it once the next one
/// is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    factor1: u32,
    factor2: u32,
    answer: u32,
}

impl Problem {
    /// Creates a problem from two factors.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::FactorOutOfRange` if either factor is zero.
    pub fn new(factor1: u32, factor2: u32) -> Result<Self, ProblemError> {
        if factor1 == 0 {
            return Err(ProblemError::FactorOutOfRange(factor1));
        }
        if factor2 == 0 {
            return Err(ProblemError::FactorOutOfRange(factor2));
        }

        Ok(Self {
            factor1,
            factor2,
            answer: factor1 * factor2,
        })
    }

    #[must_use]
    pub fn factor1(&self) -> u32 {
        self.factor1
    }

    #[must_use]
    pub fn factor2(&self) -> u32 {
        self.factor2
    }

    #[must_use]
    pub fn answer(&self) -> u32 {
        self.answer
    }

    /// Operand-order-insensitive identity: `3 × 4` and `4 × 3` share a key.
    #[must_use]
    pub fn pair_key(&self) -> (u32, u32) {
        (
            self.factor1.min(self.factor2),
            self.factor1.max(self.factor2),
        )
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.factor1, self.factor2)
    }
}

//
// ─── FACTOR RANGE ──────────────────────────────────────────────────────────────
//

/// Inclusive bounds both factors of a generated problem are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorRange {
    min: u32,
    max: u32,
}

impl FactorRange {
    /// Creates a range with `1 <= min <= max`.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::FactorOutOfRange` if `min` is zero, or
    /// `ProblemError::EmptyRange` if `max < min`.
    pub fn new(min: u32, max: u32) -> Result<Self, ProblemError> {
        if min == 0 {
            return Err(ProblemError::FactorOutOfRange(min));
        }
        if max < min {
            return Err(ProblemError::EmptyRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of distinct values a single factor can take.
    #[must_use]
    pub fn span(&self) -> u32 {
        self.max - self.min + 1
    }

    /// Number of ordered factor pairs this range can produce.
    #[must_use]
    pub fn possible_pairs(&self) -> u64 {
        u64::from(self.span()) * u64::from(self.span())
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Named difficulty tiers, each mapping to a factor range and a base point
/// weight. Weights increase with the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Factor bounds problems of this difficulty are drawn from.
    #[must_use]
    pub fn factor_range(self) -> FactorRange {
        match self {
            Difficulty::Easy => FactorRange { min: 1, max: 5 },
            Difficulty::Medium => FactorRange { min: 2, max: 9 },
            Difficulty::Hard => FactorRange { min: 6, max: 12 },
        }
    }

    /// Flat points awarded for a correct answer before the time bonus.
    #[must_use]
    pub fn base_points(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
