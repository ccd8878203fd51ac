use serde::Serialize;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("round index must be at least 1")]
    InvalidRound,

    #[error("correct count ({correct}) exceeds total ({total})")]
    CountMismatch { correct: u32, total: u32 },

    #[error("too many questions for a single round: {len}")]
    CountOverflow { len: usize },
}

//
// ─── ROUND RECORD ──────────────────────────────────────────────────────────────
//

/// Durable result of one completed round.
///
/// Created exactly once, at round completion, then appended to the history
/// store and never mutated. Serializes with the exact field names the
/// persisted history uses; rehydration goes through the storage layer so
/// the invariants here are re-checked on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    round: u32,
    points: u32,
    correct: u32,
    total: u32,
    timestamp: String,
}

impl RoundRecord {
    /// Creates a record, enforcing `round >= 1` and `correct <= total`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidRound` or `RecordError::CountMismatch`
    /// when the tallies are inconsistent.
    pub fn new(
        round: u32,
        points: u32,
        correct: u32,
        total: u32,
        timestamp: String,
    ) -> Result<Self, RecordError> {
        if round == 0 {
            return Err(RecordError::InvalidRound);
        }
        if correct > total {
            return Err(RecordError::CountMismatch { correct, total });
        }

        Ok(Self {
            round,
            points,
            correct,
            total,
            timestamp,
        })
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Human-readable capture time of the record.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

//
// ─── GLOBAL PROGRESS ───────────────────────────────────────────────────────────
//

/// Cross-screen progress marker: the round up next and the points banked so
/// far. Shared between contexts through the progress store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlobalProgress {
    pub round: u32,
    pub score: u32,
}

impl GlobalProgress {
    /// Progress after closing out `record`: the next round is queued and the
    /// record's points are banked.
    #[must_use]
    pub fn after_round(self, record: &RoundRecord) -> Self {
        Self {
            round: record.round().saturating_add(1),
            score: self.score.saturating_add(record.points()),
        }
    }
}

impl Default for GlobalProgress {
    fn default() -> Self {
        Self { round: 1, score: 0 }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_holds_tallies() {
        let record = RoundRecord::new(2, 85, 7, 10, "2023-11-14 22:13:20".into()).unwrap();
        assert_eq!(record.round(), 2);
        assert_eq!(record.points(), 85);
        assert_eq!(record.correct(), 7);
        assert_eq!(record.total(), 10);
        assert_eq!(record.timestamp(), "2023-11-14 22:13:20");
    }

    #[test]
    fn record_rejects_round_zero() {
        let err = RoundRecord::new(0, 10, 1, 1, String::new()).unwrap_err();
        assert!(matches!(err, RecordError::InvalidRound));
    }

    #[test]
    fn record_rejects_correct_above_total() {
        let err = RoundRecord::new(1, 10, 5, 3, String::new()).unwrap_err();
        assert!(matches!(
            err,
            RecordError::CountMismatch {
                correct: 5,
                total: 3
            }
        ));
    }

    #[test]
    fn record_serializes_with_stable_field_names() {
        let record = RoundRecord::new(1, 50, 5, 10, "2023-11-14 22:13:20".into()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["round"], 1);
        assert_eq!(json["points"], 50);
        assert_eq!(json["correct"], 5);
        assert_eq!(json["total"], 10);
        assert_eq!(json["timestamp"], "2023-11-14 22:13:20");
    }

    #[test]
    fn progress_starts_at_round_one() {
        let progress = GlobalProgress::default();
        assert_eq!(progress.round, 1);
        assert_eq!(progress.score, 0);
    }

    #[test]
    fn progress_advances_after_a_round() {
        let record = RoundRecord::new(3, 120, 9, 10, String::new()).unwrap();
        let progress = GlobalProgress { round: 3, score: 200 }.after_round(&record);
        assert_eq!(progress.round, 4);
        assert_eq!(progress.score, 320);
    }
}
