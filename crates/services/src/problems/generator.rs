use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{ChoiceError, ChoiceSet, FactorRange, Problem};

/// Offset magnitude tried around the correct answer before widening.
const BASE_OFFSET_MAGNITUDE: u32 = 5;
/// How much the offset window grows per widening step.
const OFFSET_WIDEN_STEP: u32 = 5;
/// Window size beyond which the configuration is treated as absurd.
const MAX_OFFSET_MAGNITUDE: u32 = 10_000;
/// Proposal budget per unit of window size before the window is widened.
const ATTEMPTS_PER_UNIT: u32 = 20;

/// Draws a problem with both factors uniform and independent in `range`.
pub fn generate(rng: &mut impl Rng, range: FactorRange) -> Problem {
    let factor1 = rng.random_range(range.min()..=range.max());
    let factor2 = rng.random_range(range.min()..=range.max());
    Problem::new(factor1, factor2).expect("factors from a validated range are positive")
}

/// Builds a shuffled multiple-choice set around `problem`'s answer.
///
/// Distractors are `answer + offset` for non-zero offsets of magnitude up to
/// an expanding window, keeping only positive, distinct, non-correct values.
/// When the current window cannot fill the set (tiny answers, large option
/// counts) it widens instead of spinning, so the search always terminates.
///
/// # Errors
///
/// Returns `ChoiceError::TooFewOptions` for `option_count < 2`, or
/// `ChoiceError::Exhausted` when even the widest window cannot fill the set.
pub fn generate_choices(
    rng: &mut impl Rng,
    problem: &Problem,
    option_count: usize,
) -> Result<ChoiceSet, ChoiceError> {
    if option_count < 2 {
        return Err(ChoiceError::TooFewOptions(option_count));
    }

    let answer = problem.answer();
    let mut options = Vec::with_capacity(option_count);
    options.push(answer);

    let mut magnitude = BASE_OFFSET_MAGNITUDE;
    let mut attempts: u32 = 0;

    while options.len() < option_count {
        let too_small = candidate_capacity(answer, magnitude) + 1 < option_count;
        let stale = attempts >= magnitude.saturating_mul(ATTEMPTS_PER_UNIT);
        if too_small || stale {
            magnitude = magnitude.saturating_add(OFFSET_WIDEN_STEP);
            attempts = 0;
            if magnitude > MAX_OFFSET_MAGNITUDE {
                return Err(ChoiceError::Exhausted {
                    answer,
                    requested: option_count,
                });
            }
            continue;
        }

        attempts += 1;
        let offset = rng.random_range(-i64::from(magnitude)..=i64::from(magnitude));
        if offset == 0 {
            continue;
        }
        let Some(candidate) = offset_candidate(answer, offset) else {
            continue;
        };
        if options.contains(&candidate) {
            continue;
        }
        options.push(candidate);
    }

    options.shuffle(rng);
    ChoiceSet::new(options, answer)
}

/// Distinct positive non-answer values reachable within `magnitude` of
/// `answer`.
fn candidate_capacity(answer: u32, magnitude: u32) -> usize {
    let below = answer.saturating_sub(1).min(magnitude);
    usize::try_from(below + magnitude).unwrap_or(usize::MAX)
}

fn offset_candidate(answer: u32, offset: i64) -> Option<u32> {
    let value = i64::from(answer) + offset;
    if value <= 0 {
        return None;
    }
    u32::try_from(value).ok()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
