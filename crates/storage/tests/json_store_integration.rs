use quiz_core::model::{GlobalProgress, RoundRecord};
use storage::json_file::{HISTORY_KEY, PROGRESS_KEY};
use storage::{HistoryRepository, JsonFileStore, ProgressRepository, Storage};

fn record(round: u32, points: u32, correct: u32, total: u32) -> RoundRecord {
    RoundRecord::new(round, points, correct, total, "2023-11-14 22:13:20".into()).unwrap()
}

#[test]
fn two_stores_share_one_directory() {
    let dir = tempfile::tempdir().unwrap();

    let writer = JsonFileStore::open(dir.path()).unwrap();
    writer.append(&record(1, 55, 4, 6)).unwrap();
    writer.append(&record(2, 80, 6, 6)).unwrap();

    // a second context opening the same directory sees the same history
    let reader = JsonFileStore::open(dir.path()).unwrap();
    let loaded = reader.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].round(), 2);
    assert_eq!(loaded[1].points(), 80);
}

#[test]
fn progress_is_shared_across_contexts() {
    let dir = tempfile::tempdir().unwrap();

    let writer = JsonFileStore::open(dir.path()).unwrap();
    writer
        .save_progress(GlobalProgress { round: 3, score: 210 })
        .unwrap();

    let reader = JsonFileStore::open(dir.path()).unwrap();
    assert_eq!(
        reader.load_progress().unwrap(),
        GlobalProgress { round: 3, score: 210 }
    );
}

#[test]
fn each_persist_announces_its_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    let rx = store.subscribe();

    store.append(&record(1, 10, 1, 2)).unwrap();
    store
        .save_progress(GlobalProgress { round: 2, score: 10 })
        .unwrap();

    let first = rx.try_recv().unwrap();
    assert_eq!(first.key, HISTORY_KEY);
    let second = rx.try_recv().unwrap();
    assert_eq!(second.key, PROGRESS_KEY);
    assert!(rx.try_recv().is_err());
}

#[test]
fn aggregate_wires_both_repositories_to_one_backend() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::json_file(dir.path()).unwrap();

    storage.history.append(&record(1, 65, 5, 8)).unwrap();
    storage
        .progress
        .save_progress(GlobalProgress { round: 2, score: 65 })
        .unwrap();

    assert_eq!(storage.history.load().unwrap().len(), 1);
    assert_eq!(storage.progress.load_progress().unwrap().score, 65);
}

#[test]
fn corrupted_history_is_isolated_from_appends() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    std::fs::write(dir.path().join("round_history.json"), "42").unwrap();
    assert!(store.load().unwrap().is_empty());

    // appending over corrupt data starts a fresh, well-formed sequence
    store.append(&record(1, 20, 2, 4)).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].points(), 20);
}
