//! Shared error types for the services crate.

use thiserror::Error;

use progress_core::progression::ProgressionError;
use storage::sqlite::SqliteInitError;

/// Errors raised while retrieving a fact. They never leave `HttpFactSource`;
/// every one of them is turned into the fallback text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactError {
    #[error("fact source is offline")]
    Disabled,
    #[error("invalid fact endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("fact request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("fact response had no text")]
    EmptyText,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

/// Why a toggle request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ToggleError {
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    /// Every phase is complete and the celebration has not been dismissed yet.
    #[error("close the celebration message before changing progress")]
    CelebrationPending,
}

impl ToggleError {
    #[must_use]
    pub fn is_gate_rejection(&self) -> bool {
        matches!(self, ToggleError::Progression(err) if err.is_gate_rejection())
    }
}
