use thiserror::Error;

use crate::model::{ChoiceError, ProblemError, RecordError, SettingsError};
use crate::scoring::ScoringError;

/// Umbrella error for callers that don't care which domain rule tripped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error(transparent)]
    Choice(#[from] ChoiceError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
