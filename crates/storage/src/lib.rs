#![forbid(unsafe_code)]

pub mod json_file;
pub mod notify;
pub mod repository;

pub use json_file::JsonFileStore;
pub use notify::{ChangeBus, ChangeEvent};
pub use repository::{
    HistoryRepository, InMemoryStore, ProgressRepository, Storage, StorageError,
};
