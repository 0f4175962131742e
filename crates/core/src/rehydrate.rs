//! Startup reconciliation of the built-in structure with persisted progress.
//!
//! The default structure decides the shape (ids, names, contents, order).
//! Persisted data only contributes completion flags, and anything that cannot
//! be read is treated as absent instead of failing the merge.

use serde_json::{Map, Value};

use crate::model::{Phase, ProgressSnapshot};

/// Result of a merge plus what happened to the persisted data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rehydrated {
    pub snapshot: ProgressSnapshot,
    /// Default phases that found a persisted counterpart.
    pub restored_phases: usize,
    /// Persisted phases with no counterpart in the default structure.
    pub discarded_phases: usize,
    /// The persisted value was present but not an array of phases.
    pub malformed: bool,
}

/// Merge persisted progress into `defaults`.
///
/// Task flags are restored by task id and the phase flag is recomputed from
/// them. A persisted phase without a readable `tasks` array falls back to its
/// phase-level `completed` flag, which then applies to every task of the phase.
///
/// ```
/// # use progress_core::model::default_structure;
/// # use progress_core::rehydrate::merge;
/// let raw = serde_json::json!([{ "id": 2, "completed": true }, { "id": 7 }]);
/// let merged = merge(&default_structure(), Some(&raw));
/// assert_eq!(merged.restored_phases, 1);
/// assert_eq!(merged.discarded_phases, 1);
/// assert_eq!(merged.snapshot.completed_task_count(), 2);
/// ```
#[must_use]
pub fn merge(defaults: &ProgressSnapshot, persisted: Option<&Value>) -> Rehydrated {
    let (entries, malformed) = match persisted {
        None | Some(Value::Null) => (&[][..], false),
        Some(Value::Array(items)) => (items.as_slice(), false),
        Some(_) => (&[][..], true),
    };

    let persisted_phases: Vec<(u64, &Map<String, Value>)> = entries
        .iter()
        .filter_map(|entry| {
            let object = entry.as_object()?;
            let id = object.get("id")?.as_u64()?;
            Some((id, object))
        })
        .collect();

    let mut restored_phases = 0;
    let phases: Vec<Phase> = defaults
        .phases()
        .iter()
        .map(|phase| {
            let found = persisted_phases
                .iter()
                .find(|(id, _)| *id == u64::from(phase.id().value()));
            match found {
                Some((_, saved)) => {
                    restored_phases += 1;
                    restore_phase(phase, saved)
                }
                None => phase.clone(),
            }
        })
        .collect();

    let discarded_phases = persisted_phases
        .iter()
        .filter(|(id, _)| {
            !defaults
                .phases()
                .iter()
                .any(|phase| u64::from(phase.id().value()) == *id)
        })
        .count();

    Rehydrated {
        snapshot: ProgressSnapshot::from_trusted(phases),
        restored_phases,
        discarded_phases,
        malformed,
    }
}

fn restore_phase(phase: &Phase, saved: &Map<String, Value>) -> Phase {
    let mut restored = phase.clone();

    let Some(saved_tasks) = saved.get("tasks").and_then(Value::as_array) else {
        if let Some(completed) = saved.get("completed").and_then(Value::as_bool) {
            restored.set_all_tasks(completed);
        }
        return restored;
    };

    for task in phase.tasks() {
        let flag = saved_tasks
            .iter()
            .filter_map(Value::as_object)
            .find(|t| t.get("id").and_then(Value::as_u64) == Some(u64::from(task.id().value())))
            .and_then(|t| t.get("completed"))
            .and_then(Value::as_bool);
        if let (Some(completed), Some(target)) = (flag, restored.task_mut(task.id())) {
            target.set_completed(completed);
        }
    }
    restored.recompute_completion();
    restored
}
