use std::sync::Arc;

use progress_core::Clock;
use progress_core::model::ProgressSnapshot;
use serde_json::Value;

use crate::repository::{KeyValueRepository, StorageError};

/// Key the snapshot is kept under unless configured otherwise.
pub const DEFAULT_PROGRESS_KEY: &str = "progress";

/// What was found under the progress key.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Absent,
    /// Something was stored but it is not valid JSON.
    Malformed(String),
    Present(Value),
}

impl Loaded {
    /// Raw decoded value, if any. Malformed data reads as absent.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Loaded::Present(value) => Some(value),
            Loaded::Absent | Loaded::Malformed(_) => None,
        }
    }
}

/// Reads and writes the serialized progress snapshot under a single key.
#[derive(Clone)]
pub struct ProgressStore {
    repo: Arc<dyn KeyValueRepository>,
    key: String,
    clock: Clock,
}

impl ProgressStore {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>, key: impl Into<String>, clock: Clock) -> Self {
        Self {
            repo,
            key: key.into(),
            clock,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored snapshot as untyped JSON.
    ///
    /// Decoding problems are reported as `Loaded::Malformed`, never as an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the backend itself cannot be read.
    pub async fn load(&self) -> Result<Loaded, StorageError> {
        let Some(stored) = self.repo.get_value(&self.key).await? else {
            return Ok(Loaded::Absent);
        };
        Ok(match serde_json::from_str::<Value>(&stored.value) {
            Ok(value) => Loaded::Present(value),
            Err(err) => Loaded::Malformed(err.to_string()),
        })
    }

    /// Serialize and write the full snapshot, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    pub async fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(snapshot)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.repo
            .put_value(&self.key, &encoded, self.clock.now())
            .await
    }
}
