use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Receiver;

use quiz_core::model::{GlobalProgress, RoundRecord};

use crate::notify::{ChangeBus, ChangeEvent};
use crate::repository::{
    HistoryRepository, ProgressRepository, Storage, StorageError, StoredProgress, StoredRound,
};

/// Logical key announced when the round history document changes.
pub const HISTORY_KEY: &str = "round_history";
/// Logical key announced when the progress document changes.
pub const PROGRESS_KEY: &str = "global_progress";

/// JSON-document store for round history and global progress.
///
/// Each key lives in its own file under the store directory. Loads are
/// lenient per the engine's contract: a missing file, unreadable file,
/// non-array payload, or invalid record loads as empty (or default
/// progress) with a logged warning, never an error. Appends rewrite the
/// whole document; concurrent writers from other processes are
/// last-write-wins, which callers sharing a directory must accept.
#[derive(Clone)]
pub struct JsonFileStore {
    history_path: PathBuf,
    progress_path: PathBuf,
    bus: ChangeBus,
}

impl JsonFileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            history_path: dir.join("round_history.json"),
            progress_path: dir.join("global_progress.json"),
            bus: ChangeBus::new(),
        })
    }

    /// Subscribes to advisory change events for this store's keys.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        self.bus.subscribe()
    }

    fn read_document(path: &Path) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("could not read {}, treating as empty: {err}", path.display());
                None
            }
        }
    }
}

impl HistoryRepository for JsonFileStore {
    fn load(&self) -> Result<Vec<RoundRecord>, StorageError> {
        let Some(raw) = Self::read_document(&self.history_path) else {
            return Ok(Vec::new());
        };

        let stored: Vec<StoredRound> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                log::warn!(
                    "round history at {} is not a record array, treating as empty: {err}",
                    self.history_path.display()
                );
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::with_capacity(stored.len());
        for entry in stored {
            match entry.into_record() {
                Ok(record) => records.push(record),
                Err(err) => {
                    log::warn!(
                        "round history at {} holds an invalid record, treating as empty: {err}",
                        self.history_path.display()
                    );
                    return Ok(Vec::new());
                }
            }
        }
        Ok(records)
    }

    fn append(&self, record: &RoundRecord) -> Result<(), StorageError> {
        let mut records = self.load()?;
        records.push(record.clone());

        let payload = serde_json::to_string_pretty(&records)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        fs::write(&self.history_path, &payload)?;
        self.bus.publish(HISTORY_KEY, &payload);
        Ok(())
    }
}

impl ProgressRepository for JsonFileStore {
    fn load_progress(&self) -> Result<GlobalProgress, StorageError> {
        let Some(raw) = Self::read_document(&self.progress_path) else {
            return Ok(GlobalProgress::default());
        };

        match serde_json::from_str::<StoredProgress>(&raw) {
            Ok(stored) => Ok(stored.into_progress()),
            Err(err) => {
                log::warn!(
                    "progress at {} is malformed, using defaults: {err}",
                    self.progress_path.display()
                );
                Ok(GlobalProgress::default())
            }
        }
    }

    fn save_progress(&self, progress: GlobalProgress) -> Result<(), StorageError> {
        let payload = serde_json::to_string_pretty(&progress)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        fs::write(&self.progress_path, &payload)?;
        self.bus.publish(PROGRESS_KEY, &payload);
        Ok(())
    }
}

impl Storage {
    /// File-backed storage rooted at `dir`, sharing one store (and one
    /// change bus) between both repositories.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn json_file(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let store = Arc::new(JsonFileStore::open(dir)?);
        let history: Arc<dyn HistoryRepository> = store.clone();
        let progress: Arc<dyn ProgressRepository> = store;
        Ok(Self { history, progress })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: u32, points: u32) -> RoundRecord {
        RoundRecord::new(round, points, 2, 3, "2023-11-14 22:13:20".into()).unwrap()
    }

    #[test]
    fn missing_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.load_progress().unwrap(), GlobalProgress::default());
    }

    #[test]
    fn append_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        store.append(&record(1, 40)).unwrap();
        store.append(&record(2, 70)).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].round(), 1);
        assert_eq!(loaded[1].points(), 70);
    }

    #[test]
    fn non_array_payload_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("round_history.json"), "{\"oops\": 1}").unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn garbage_payload_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("round_history.json"), "not json at all").unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn invalid_record_discards_the_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        // correct > total violates the record invariant
        fs::write(
            dir.path().join("round_history.json"),
            "[{\"round\": 1, \"points\": 5, \"correct\": 9, \"total\": 2, \"timestamp\": \"\"}]",
        )
        .unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn progress_round_trips_and_tolerates_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        let progress = GlobalProgress { round: 6, score: 480 };
        store.save_progress(progress).unwrap();
        assert_eq!(store.load_progress().unwrap(), progress);

        fs::write(dir.path().join("global_progress.json"), "[]").unwrap();
        assert_eq!(store.load_progress().unwrap(), GlobalProgress::default());
    }

    #[test]
    fn appends_publish_change_events() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let rx = store.subscribe();

        store.append(&record(1, 15)).unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.key, HISTORY_KEY);
        assert!(event.payload.contains("\"points\": 15"));
    }
}
