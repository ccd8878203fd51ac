use std::sync::{Arc, Mutex};

use serde::Deserialize;
use thiserror::Error;

use quiz_core::model::{GlobalProgress, RecordError, RoundRecord};

/// Errors surfaced by storage adapters.
///
/// Malformed persisted *data* is not an error at this boundary: stores load
/// it as an empty history (or default progress) and log a warning. Errors
/// here mean the medium itself failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage lock poisoned")]
    Poisoned,
}

//
// ─── PERSISTED SHAPES ──────────────────────────────────────────────────────────
//

fn default_round() -> u32 {
    1
}

/// Persisted shape for a round record.
///
/// Mirrors the domain `RoundRecord` so stores can deserialize leniently
/// (absent keys fall back to defaults) before domain validation runs on the
/// way back into the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredRound {
    #[serde(default = "default_round")]
    pub round: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub timestamp: String,
}

impl StoredRound {
    /// Convert the stored shape back into a validated domain record.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if the persisted tallies are inconsistent.
    pub fn into_record(self) -> Result<RoundRecord, RecordError> {
        RoundRecord::new(
            self.round,
            self.points,
            self.correct,
            self.total,
            self.timestamp,
        )
    }
}

/// Persisted shape for the cross-screen progress marker.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredProgress {
    #[serde(default = "default_round")]
    pub round: u32,
    #[serde(default)]
    pub score: u32,
}

impl StoredProgress {
    #[must_use]
    pub fn into_progress(self) -> GlobalProgress {
        GlobalProgress {
            round: self.round.max(1),
            score: self.score,
        }
    }
}

//
// ─── REPOSITORY CONTRACTS ──────────────────────────────────────────────────────
//

/// Contract the engine requires of its round-history collaborator.
///
/// The history is append-only and chronological; ranking produces a view
/// elsewhere, so implementations never reorder or delete what they hold.
pub trait HistoryRepository: Send + Sync {
    /// Load the full history, oldest first.
    ///
    /// Missing or malformed persisted data loads as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the storage medium itself fails.
    fn load(&self) -> Result<Vec<RoundRecord>, StorageError>;

    /// Append a record to the end of the history and persist the sequence.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated sequence cannot be persisted.
    fn append(&self, record: &RoundRecord) -> Result<(), StorageError>;
}

/// Contract for the shared "current round / cumulative score" marker.
pub trait ProgressRepository: Send + Sync {
    /// Load the marker; missing or malformed data loads as the default.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the storage medium itself fails.
    fn load_progress(&self) -> Result<GlobalProgress, StorageError>;

    /// Persist the marker, replacing the previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the marker cannot be persisted.
    fn save_progress(&self, progress: GlobalProgress) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    history: Arc<Mutex<Vec<RoundRecord>>>,
    progress: Arc<Mutex<GlobalProgress>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryRepository for InMemoryStore {
    fn load(&self) -> Result<Vec<RoundRecord>, StorageError> {
        let guard = self.history.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(guard.clone())
    }

    fn append(&self, record: &RoundRecord) -> Result<(), StorageError> {
        let mut guard = self.history.lock().map_err(|_| StorageError::Poisoned)?;
        guard.push(record.clone());
        Ok(())
    }
}

impl ProgressRepository for InMemoryStore {
    fn load_progress(&self) -> Result<GlobalProgress, StorageError> {
        let guard = self.progress.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(*guard)
    }

    fn save_progress(&self, progress: GlobalProgress) -> Result<(), StorageError> {
        let mut guard = self.progress.lock().map_err(|_| StorageError::Poisoned)?;
        *guard = progress;
        Ok(())
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates the repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub history: Arc<dyn HistoryRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        let history: Arc<dyn HistoryRepository> = Arc::new(store.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(store);
        Self { history, progress }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: u32, points: u32) -> RoundRecord {
        RoundRecord::new(round, points, 3, 5, "2023-11-14 22:13:20".into()).unwrap()
    }

    #[test]
    fn in_memory_append_preserves_insertion_order() {
        let store = InMemoryStore::new();
        store.append(&record(1, 40)).unwrap();
        store.append(&record(2, 90)).unwrap();
        store.append(&record(3, 10)).unwrap();

        let loaded = store.load().unwrap();
        let rounds: Vec<u32> = loaded.iter().map(RoundRecord::round).collect();
        assert_eq!(rounds, vec![1, 2, 3]);
    }

    #[test]
    fn in_memory_progress_round_trips() {
        let store = InMemoryStore::new();
        assert_eq!(store.load_progress().unwrap(), GlobalProgress::default());

        let progress = GlobalProgress { round: 4, score: 310 };
        store.save_progress(progress).unwrap();
        assert_eq!(store.load_progress().unwrap(), progress);
    }

    #[test]
    fn stored_round_validates_on_rehydration() {
        let stored = StoredRound {
            round: 1,
            points: 50,
            correct: 9,
            total: 5,
            timestamp: String::new(),
        };
        assert!(stored.into_record().is_err());
    }

    #[test]
    fn stored_round_tolerates_absent_keys() {
        let stored: StoredRound = serde_json::from_str("{\"points\": 30}").unwrap();
        let rehydrated = stored.into_record().unwrap();
        assert_eq!(rehydrated.round(), 1);
        assert_eq!(rehydrated.points(), 30);
        assert_eq!(rehydrated.total(), 0);
    }

    #[test]
    fn stored_progress_clamps_round_to_one() {
        let stored: StoredProgress = serde_json::from_str("{\"round\": 0, \"score\": 12}").unwrap();
        let progress = stored.into_progress();
        assert_eq!(progress.round, 1);
        assert_eq!(progress.score, 12);
    }

    #[test]
    fn storage_aggregate_shares_one_backend() {
        let storage = Storage::in_memory();
        storage.history.append(&record(1, 25)).unwrap();
        assert_eq!(storage.history.load().unwrap().len(), 1);
    }
}
