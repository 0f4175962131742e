use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::model::ids::{PhaseId, TaskId};
use crate::model::phase::Phase;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("duplicate phase id {0}")]
    DuplicatePhase(PhaseId),

    #[error("duplicate task id {task} in phase {phase}")]
    DuplicateTask { phase: PhaseId, task: TaskId },
}

/// Full state of all phases and tasks at a point in time.
///
/// Serializes as a bare JSON array of phases, the format kept in durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProgressSnapshot {
    phases: Vec<Phase>,
}

impl ProgressSnapshot {
    /// Build a snapshot, enforcing unique phase ids and per-phase unique task ids.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` on the first duplicate id found.
    pub fn new(phases: Vec<Phase>) -> Result<Self, SnapshotError> {
        let mut seen_phases = HashSet::new();
        for phase in &phases {
            if !seen_phases.insert(phase.id()) {
                return Err(SnapshotError::DuplicatePhase(phase.id()));
            }
            let mut seen_tasks = HashSet::new();
            for task in phase.tasks() {
                if !seen_tasks.insert(task.id()) {
                    return Err(SnapshotError::DuplicateTask {
                        phase: phase.id(),
                        task: task.id(),
                    });
                }
            }
        }
        Ok(Self { phases })
    }

    pub(crate) fn from_trusted(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    #[must_use]
    pub fn phase(&self, id: PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|phase| phase.id() == id)
    }

    pub(crate) fn phase_mut(&mut self, id: PhaseId) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|phase| phase.id() == id)
    }

    pub(crate) fn phases_mut(&mut self) -> impl Iterator<Item = &mut Phase> {
        self.phases.iter_mut()
    }

    #[must_use]
    pub fn total_task_count(&self) -> usize {
        self.phases.iter().map(|phase| phase.tasks().len()).sum()
    }

    #[must_use]
    pub fn completed_task_count(&self) -> usize {
        self.phases.iter().map(Phase::completed_count).sum()
    }

    /// First phase, in stored order, that is not yet complete.
    #[must_use]
    pub fn current_phase(&self) -> Option<&Phase> {
        self.phases.iter().find(|phase| !phase.is_completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;

    #[test]
    fn rejects_duplicate_phase_ids() {
        let err = ProgressSnapshot::new(vec![
            Phase::new(PhaseId::new(1), "A", vec![]),
            Phase::new(PhaseId::new(1), "B", vec![]),
        ])
        .unwrap_err();
        assert_eq!(err, SnapshotError::DuplicatePhase(PhaseId::new(1)));
    }

    #[test]
    fn task_ids_are_scoped_to_their_phase() {
        let snapshot = ProgressSnapshot::new(vec![
            Phase::new(PhaseId::new(1), "A", vec![Task::new(TaskId::new(1), "a")]),
            Phase::new(PhaseId::new(2), "B", vec![Task::new(TaskId::new(1), "b")]),
        ]);
        assert!(snapshot.is_ok());

        let err = ProgressSnapshot::new(vec![Phase::new(
            PhaseId::new(3),
            "C",
            vec![Task::new(TaskId::new(1), "x"), Task::new(TaskId::new(1), "y")],
        )])
        .unwrap_err();
        assert_eq!(
            err,
            SnapshotError::DuplicateTask {
                phase: PhaseId::new(3),
                task: TaskId::new(1)
            }
        );
    }

    #[test]
    fn counts_and_current_phase() {
        let snapshot = ProgressSnapshot::new(vec![
            Phase::new(
                PhaseId::new(1),
                "A",
                vec![Task::new(TaskId::new(1), "a").with_completed(true)],
            ),
            Phase::new(
                PhaseId::new(2),
                "B",
                vec![
                    Task::new(TaskId::new(1), "b").with_completed(true),
                    Task::new(TaskId::new(2), "c"),
                ],
            ),
        ])
        .unwrap();

        assert_eq!(snapshot.total_task_count(), 3);
        assert_eq!(snapshot.completed_task_count(), 2);
        assert_eq!(snapshot.current_phase().map(Phase::id), Some(PhaseId::new(2)));
    }
}
