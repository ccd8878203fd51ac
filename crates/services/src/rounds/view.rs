use std::sync::Arc;

use quiz_core::leaderboard;
use quiz_core::model::{GlobalProgress, RoundRecord};
use quiz_core::scoring::ScoringPolicy;
use storage::{HistoryRepository, ProgressRepository, StorageError};

/// Presentation-agnostic leaderboard row.
///
/// This is intentionally **not** a UI view-model: no pre-formatted strings
/// beyond the record's stored capture time, no truncation. The UI decides
/// how many rows to show and how to format them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based rank.
    pub position: usize,
    pub round: u32,
    pub points: u32,
    pub correct: u32,
    pub total: u32,
    pub accuracy_percent: u8,
    pub timestamp: String,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn from_record(position: usize, record: &RoundRecord) -> Self {
        Self {
            position,
            round: record.round(),
            points: record.points(),
            correct: record.correct(),
            total: record.total(),
            accuracy_percent: ScoringPolicy::accuracy_percent(record.correct(), record.total()),
            timestamp: record.timestamp().to_owned(),
        }
    }
}

/// Read-only facade over round history for the UI.
///
/// Hides the repositories from presentation code; the ranking itself is a
/// pure view and never mutates the persisted sequence.
#[derive(Clone)]
pub struct LeaderboardService {
    history: Arc<dyn HistoryRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(
        history: Arc<dyn HistoryRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self { history, progress }
    }

    /// Ranked view over the full history, best round first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the history cannot be read at all;
    /// malformed history loads as empty and ranks to an empty board.
    pub fn ranked(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let ranked = leaderboard::rank(&self.history.load()?);
        Ok(ranked
            .iter()
            .enumerate()
            .map(|(index, record)| LeaderboardEntry::from_record(index + 1, record))
            .collect())
    }

    /// The shared "up next" marker: current round and cumulative score.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the progress store cannot be read.
    pub fn global_progress(&self) -> Result<GlobalProgress, StorageError> {
        self.progress.load_progress()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
