use std::sync::Arc;

use progress_core::Clock;
use progress_core::model::{PhaseId, TaskId, default_structure};
use progress_core::progression::toggle_task;
use progress_core::rehydrate::merge;
use progress_core::time::fixed_now;
use storage::repository::KeyValueRepository;
use storage::sqlite::SqliteRepository;
use storage::{DEFAULT_PROGRESS_KEY, Loaded, ProgressStore, Storage};

async fn connect(name: &str) -> SqliteRepository {
    let repo = SqliteRepository::connect(&format!("sqlite:file:{name}?mode=memory&cache=shared"))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_upsert_replaces_value() {
    let repo = connect("memdb_upsert").await;
    repo.put_value("progress", "[]", fixed_now()).await.unwrap();
    repo.put_value("progress", "[{\"id\":1}]", fixed_now())
        .await
        .unwrap();

    let stored = repo.get_value("progress").await.unwrap().expect("stored");
    assert_eq!(stored.value, "[{\"id\":1}]");
    assert_eq!(stored.updated_at, fixed_now());
    assert!(repo.get_value("other").await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn snapshot_survives_a_store_round_trip() {
    let repo = connect("memdb_snapshot").await;
    let store = ProgressStore::new(Arc::new(repo), DEFAULT_PROGRESS_KEY, Clock::fixed(fixed_now()));

    let mut snapshot = default_structure();
    for task in 1..=4 {
        snapshot = toggle_task(&snapshot, PhaseId::new(1), TaskId::new(task)).unwrap();
    }
    store.save(&snapshot).await.unwrap();

    let loaded = store.load().await.unwrap();
    let merged = merge(&default_structure(), loaded.value());
    assert_eq!(merged.snapshot, snapshot);
    assert!(merged.snapshot.phase(PhaseId::new(1)).unwrap().is_completed());
}

#[tokio::test]
async fn corrupted_row_loads_as_malformed() {
    let storage = Storage::sqlite("sqlite:file:memdb_corrupt?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .entries
        .put_value(DEFAULT_PROGRESS_KEY, "not-json", fixed_now())
        .await
        .unwrap();

    let store = ProgressStore::new(storage.entries, DEFAULT_PROGRESS_KEY, Clock::system());
    assert!(matches!(store.load().await.unwrap(), Loaded::Malformed(_)));
}
