use std::collections::HashSet;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChoiceError {
    #[error("at least 2 options are required, got {0}")]
    TooFewOptions(usize),

    #[error("option values must be positive")]
    NonPositiveOption,

    #[error("duplicate option value: {0}")]
    DuplicateOption(u32),

    #[error("options do not contain the correct answer {0}")]
    MissingAnswer(u32),

    #[error("could not assemble {requested} distinct options around answer {answer}")]
    Exhausted { answer: u32, requested: usize },
}

//
// ─── CHOICE SET ────────────────────────────────────────────────────────────────
//

/// Presentation-ordered answer options for one question.
///
/// Invariants, checked at construction: every option is a positive integer,
/// all options are distinct, and exactly one of them equals the correct
/// answer. Created per question and discarded once answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    options: Vec<u32>,
    correct_index: usize,
}

impl ChoiceSet {
    /// Builds a choice set from already-shuffled options.
    ///
    /// # Errors
    ///
    /// Returns a `ChoiceError` describing the violated invariant: too few
    /// options, a zero option, a duplicate, or a missing correct answer.
    pub fn new(options: Vec<u32>, answer: u32) -> Result<Self, ChoiceError> {
        if options.len() < 2 {
            return Err(ChoiceError::TooFewOptions(options.len()));
        }

        let mut seen = HashSet::with_capacity(options.len());
        for &option in &options {
            if option == 0 {
                return Err(ChoiceError::NonPositiveOption);
            }
            if !seen.insert(option) {
                return Err(ChoiceError::DuplicateOption(option));
            }
        }

        let correct_index = options
            .iter()
            .position(|&option| option == answer)
            .ok_or(ChoiceError::MissingAnswer(answer))?;

        Ok(Self {
            options,
            correct_index,
        })
    }

    #[must_use]
    pub fn options(&self) -> &[u32] {
        &self.options
    }

    /// Index of the correct answer within `options`.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_answer(&self) -> u32 {
        self.options[self.correct_index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_distinct_positive_options_containing_answer() {
        let set = ChoiceSet::new(vec![10, 12, 9, 15], 12).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.correct_index(), 1);
        assert_eq!(set.correct_answer(), 12);
        assert_eq!(set.options(), &[10, 12, 9, 15]);
    }

    #[test]
    fn rejects_too_few_options() {
        let err = ChoiceSet::new(vec![12], 12).unwrap_err();
        assert!(matches!(err, ChoiceError::TooFewOptions(1)));
    }

    #[test]
    fn rejects_zero_option() {
        let err = ChoiceSet::new(vec![12, 0], 12).unwrap_err();
        assert!(matches!(err, ChoiceError::NonPositiveOption));
    }

    #[test]
    fn rejects_duplicate_options() {
        let err = ChoiceSet::new(vec![12, 9, 9], 12).unwrap_err();
        assert!(matches!(err, ChoiceError::DuplicateOption(9)));
    }

    #[test]
    fn rejects_missing_answer() {
        let err = ChoiceSet::new(vec![10, 11, 13], 12).unwrap_err();
        assert!(matches!(err, ChoiceError::MissingAnswer(12)));
    }
}
