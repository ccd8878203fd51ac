//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ChoiceError, RecordError};
use quiz_core::scoring::ScoringError;
use storage::StorageError;

/// Errors emitted by round services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoundError {
    #[error("no problems available for round")]
    Empty,

    #[error("round has not been started")]
    NotStarted,

    #[error("round already started")]
    AlreadyStarted,

    #[error("round already finished")]
    Finished,

    #[error("tick delta must be non-negative and finite, got {0}")]
    InvalidTick(f64),

    #[error(transparent)]
    Choice(#[from] ChoiceError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
