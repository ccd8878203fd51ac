use std::cmp::Ordering;

use crate::model::RoundRecord;

/// Ranks history records for display: points descending, then accuracy
/// descending, then round index ascending. The sort is stable, so records
/// equal on all three keys keep their original relative order. The input is
/// never mutated; callers truncate the returned view as they see fit.
#[must_use]
pub fn rank(records: &[RoundRecord]) -> Vec<RoundRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(compare);
    ranked
}

fn compare(a: &RoundRecord, b: &RoundRecord) -> Ordering {
    b.points()
        .cmp(&a.points())
        .then_with(|| accuracy_cmp(b, a))
        .then_with(|| a.round().cmp(&b.round()))
}

/// Exact ascending comparison of `correct / total` ratios, no floats.
/// A record with `total == 0` ranks as accuracy zero.
fn accuracy_cmp(a: &RoundRecord, b: &RoundRecord) -> Ordering {
    let (a_correct, a_total) = accuracy_key(a);
    let (b_correct, b_total) = accuracy_key(b);
    let lhs = u64::from(a_correct) * u64::from(b_total);
    let rhs = u64::from(b_correct) * u64::from(a_total);
    lhs.cmp(&rhs)
}

fn accuracy_key(record: &RoundRecord) -> (u32, u32) {
    if record.total() == 0 {
        (0, 1)
    } else {
        (record.correct(), record.total())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: u32, points: u32, correct: u32, total: u32) -> RoundRecord {
        RoundRecord::new(round, points, correct, total, String::new()).unwrap()
    }

    #[test]
    fn points_dominate_then_accuracy_breaks_ties() {
        let records = vec![
            record(1, 50, 5, 10),
            record(2, 50, 8, 10),
            record(3, 80, 1, 1),
        ];

        let ranked = rank(&records);
        let rounds: Vec<u32> = ranked.iter().map(RoundRecord::round).collect();
        assert_eq!(rounds, vec![3, 2, 1]);
    }

    #[test]
    fn round_index_breaks_full_score_ties() {
        let records = vec![record(5, 40, 4, 8), record(2, 40, 4, 8)];
        let ranked = rank(&records);
        assert_eq!(ranked[0].round(), 2);
        assert_eq!(ranked[1].round(), 5);
    }

    #[test]
    fn zero_total_ranks_as_zero_accuracy() {
        let records = vec![record(1, 30, 0, 0), record(2, 30, 1, 10)];
        let ranked = rank(&records);
        assert_eq!(ranked[0].round(), 2);
        assert_eq!(ranked[1].round(), 1);
    }

    #[test]
    fn equal_keys_preserve_input_order() {
        // same round index is allowed in history; all three keys tie here
        let first = record(4, 25, 3, 6);
        let second = record(4, 25, 2, 4);
        let ranked = rank(&[first.clone(), second.clone()]);
        assert_eq!(ranked[0], first);
        assert_eq!(ranked[1], second);
    }

    #[test]
    fn input_is_not_mutated() {
        let records = vec![record(1, 10, 1, 2), record(2, 90, 2, 2)];
        let snapshot = records.clone();
        let _ranked = rank(&records);
        assert_eq!(records, snapshot);
    }

    #[test]
    fn empty_history_ranks_to_empty() {
        assert!(rank(&[]).is_empty());
    }
}
