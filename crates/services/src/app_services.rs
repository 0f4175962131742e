use std::sync::Arc;

use progress_core::Clock;
use progress_core::model::default_structure;
use storage::{ProgressStore, Storage};

use crate::error::AppServicesError;
use crate::facts::FactSource;
use crate::progress_service::ProgressService;
use crate::trigger::FetchTicket;

/// A started progress service plus the celebration owed at startup, if any.
pub struct AppServices {
    pub progress: ProgressService,
    pub pending_celebration: Option<FetchTicket>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(
        db_url: &str,
        key: &str,
        clock: Clock,
        facts: Arc<dyn FactSource>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, key, clock, facts).await)
    }

    /// Build services on top of an already opened storage backend.
    pub async fn from_storage(
        storage: &Storage,
        key: &str,
        clock: Clock,
        facts: Arc<dyn FactSource>,
    ) -> Self {
        let store = ProgressStore::new(Arc::clone(&storage.entries), key, clock);
        let (progress, pending_celebration) =
            ProgressService::start(&default_structure(), store, facts).await;
        Self {
            progress,
            pending_celebration,
        }
    }
}
