mod generator;
mod sampler;

use quiz_core::model::{ChoiceSet, Problem};

pub use generator::{generate, generate_choices};
pub use sampler::{ProblemBatch, sample, sample_unique};

/// A problem paired with its presentation-ready answer options.
///
/// Questions are pre-assembled in a batch when a round starts, so the
/// session itself consumes no randomness while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub problem: Problem,
    pub choices: ChoiceSet,
}
