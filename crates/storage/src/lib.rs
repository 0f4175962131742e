#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;
pub mod store;

pub use repository::{InMemoryRepository, KeyValueRepository, Storage, StorageError};
pub use store::{DEFAULT_PROGRESS_KEY, Loaded, ProgressStore};
