use std::collections::HashSet;

use rand::Rng;

use quiz_core::model::{FactorRange, Problem};

use super::generator;

/// Outcome of one batched sampling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemBatch {
    pub problems: Vec<Problem>,
    pub requested: usize,
    pub attempts: usize,
}

impl ProblemBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// True when the attempt budget ran out before `requested` problems
    /// were collected. Callers must tolerate a short batch.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.problems.len() < self.requested
    }
}

/// Samples `count` problems with no duplicate unordered factor pairs.
///
/// `3 × 4` and `4 × 3` share a key and collide. The attempt budget is
/// `max(count * 10, possible_pairs * 2)`; once exhausted the batch is
/// returned short rather than blocking.
pub fn sample_unique(rng: &mut impl Rng, count: usize, range: FactorRange) -> ProblemBatch {
    sample(rng, count, range, false)
}

/// Samples `count` problems, optionally keeping duplicate factor pairs.
pub fn sample(
    rng: &mut impl Rng,
    count: usize,
    range: FactorRange,
    allow_duplicates: bool,
) -> ProblemBatch {
    let budget = attempt_budget(count, range);
    let mut problems = Vec::with_capacity(count);
    let mut seen: HashSet<(u32, u32)> = HashSet::new();
    let mut attempts = 0;

    while problems.len() < count && attempts < budget {
        attempts += 1;
        let problem = generator::generate(rng, range);
        if !allow_duplicates && !seen.insert(problem.pair_key()) {
            continue;
        }
        problems.push(problem);
    }

    if problems.len() < count {
        log::debug!(
            "problem sampling stopped short: {}/{} after {} attempts",
            problems.len(),
            count,
            attempts
        );
    }

    ProblemBatch {
        problems,
        requested: count,
        attempts,
    }
}

fn attempt_budget(count: usize, range: FactorRange) -> usize {
    let pairs = usize::try_from(range.possible_pairs()).unwrap_or(usize::MAX);
    count.saturating_mul(10).max(pairs.saturating_mul(2))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
