#![forbid(unsafe_code)]

pub mod error;
pub mod problems;
pub mod rounds;

pub use quiz_core::Clock;

pub use error::RoundError;
pub use problems::{ProblemBatch, Question};
pub use rounds::{
    AnswerOutcome, LeaderboardEntry, LeaderboardService, RoundAnswerResult, RoundLoopService,
    RoundPhase, RoundProgress, RoundSession,
};
