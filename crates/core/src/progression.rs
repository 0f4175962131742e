use thiserror::Error;

use crate::model::{Phase, PhaseId, ProgressSnapshot, TaskId};

/// Notice shown to the user when a toggle is rejected by the phase gate.
pub const GATE_REJECTED_NOTICE: &str = "Complete all previous tasks first!";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressionError {
    #[error("phase {0} does not exist")]
    UnknownPhase(PhaseId),

    #[error("task {task} does not exist in phase {phase}")]
    UnknownTask { phase: PhaseId, task: TaskId },

    #[error("phase {blocking} must be completed before phase {phase}")]
    GateRejected { phase: PhaseId, blocking: PhaseId },
}

impl ProgressionError {
    /// True for the soft, user-facing rejection of an out-of-order toggle.
    #[must_use]
    pub fn is_gate_rejection(&self) -> bool {
        matches!(self, Self::GateRejected { .. })
    }
}

//
// ─── GATE ──────────────────────────────────────────────────────────────────────
//

/// Validate that a task may be toggled in its current snapshot.
///
/// The task must exist, and the phase whose id is one less than `phase_id`
/// (if there is one) must have all of its tasks completed. Tasks inside a
/// single phase may be toggled in any order.
///
/// # Errors
///
/// Returns `UnknownPhase`/`UnknownTask` for ids that are not in the snapshot and
/// `GateRejected` when the preceding phase is incomplete.
pub fn check_toggle(
    snapshot: &ProgressSnapshot,
    phase_id: PhaseId,
    task_id: TaskId,
) -> Result<(), ProgressionError> {
    let phase = snapshot
        .phase(phase_id)
        .ok_or(ProgressionError::UnknownPhase(phase_id))?;
    if phase.task(task_id).is_none() {
        return Err(ProgressionError::UnknownTask {
            phase: phase_id,
            task: task_id,
        });
    }

    let blocking = phase_id
        .predecessor()
        .and_then(|prev| snapshot.phase(prev))
        .filter(|prev| !prev.all_tasks_completed());
    match blocking {
        Some(prev) => Err(ProgressionError::GateRejected {
            phase: phase_id,
            blocking: prev.id(),
        }),
        None => Ok(()),
    }
}

/// Boolean form of [`check_toggle`].
///
/// ```
/// # use progress_core::model::{default_structure, PhaseId, TaskId};
/// # use progress_core::progression::can_toggle;
/// let snapshot = default_structure();
/// assert!(can_toggle(&snapshot, PhaseId::new(1), TaskId::new(1)));
/// assert!(!can_toggle(&snapshot, PhaseId::new(2), TaskId::new(1)));
/// ```
#[must_use]
pub fn can_toggle(snapshot: &ProgressSnapshot, phase_id: PhaseId, task_id: TaskId) -> bool {
    check_toggle(snapshot, phase_id, task_id).is_ok()
}

//
// ─── TRANSITIONS ───────────────────────────────────────────────────────────────
//

/// Flip one task's completion and recompute its phase's flag.
///
/// Only structural existence is checked; ordering is the caller's job via
/// [`check_toggle`]. Calling it twice restores the original state.
///
/// # Errors
///
/// Returns `UnknownPhase` or `UnknownTask` when the ids are not in the snapshot.
pub fn toggle_task(
    snapshot: &ProgressSnapshot,
    phase_id: PhaseId,
    task_id: TaskId,
) -> Result<ProgressSnapshot, ProgressionError> {
    let mut next = snapshot.clone();
    let phase = next
        .phase_mut(phase_id)
        .ok_or(ProgressionError::UnknownPhase(phase_id))?;
    let task = phase
        .task_mut(task_id)
        .ok_or(ProgressionError::UnknownTask {
            phase: phase_id,
            task: task_id,
        })?;
    task.toggle();
    phase.recompute_completion();
    Ok(next)
}

/// Every task and phase forced back to incomplete.
#[must_use]
pub fn reset_all(snapshot: &ProgressSnapshot) -> ProgressSnapshot {
    let mut next = snapshot.clone();
    for phase in next.phases_mut() {
        phase.set_all_tasks(false);
    }
    next
}

/// True when every phase is complete.
#[must_use]
pub fn is_all_complete(snapshot: &ProgressSnapshot) -> bool {
    snapshot.phases().iter().all(Phase::is_completed)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, default_structure};

    fn complete_phase(mut snapshot: ProgressSnapshot, phase: u32) -> ProgressSnapshot {
        let ids: Vec<TaskId> = snapshot
            .phase(PhaseId::new(phase))
            .unwrap()
            .tasks()
            .iter()
            .filter(|t| !t.is_completed())
            .map(Task::id)
            .collect();
        for id in ids {
            snapshot = toggle_task(&snapshot, PhaseId::new(phase), id).unwrap();
        }
        snapshot
    }

    #[test]
    fn toggle_recomputes_phase_completion() {
        let s = default_structure();
        let s = toggle_task(&s, PhaseId::new(1), TaskId::new(1)).unwrap();
        let phase = s.phase(PhaseId::new(1)).unwrap();
        assert!(phase.task(TaskId::new(1)).unwrap().is_completed());
        assert!(!phase.is_completed());

        let s = complete_phase(s, 1);
        assert!(s.phase(PhaseId::new(1)).unwrap().is_completed());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let s = default_structure();
        let once = toggle_task(&s, PhaseId::new(3), TaskId::new(2)).unwrap();
        let twice = toggle_task(&once, PhaseId::new(3), TaskId::new(2)).unwrap();
        assert_ne!(once, s);
        assert_eq!(twice, s);
    }

    #[test]
    fn untoggling_a_task_clears_phase_completion() {
        let s = complete_phase(default_structure(), 1);
        let s = toggle_task(&s, PhaseId::new(1), TaskId::new(3)).unwrap();
        assert!(!s.phase(PhaseId::new(1)).unwrap().is_completed());
    }

    #[test]
    fn toggle_unknown_ids_is_an_error() {
        let s = default_structure();
        assert_eq!(
            toggle_task(&s, PhaseId::new(9), TaskId::new(1)).unwrap_err(),
            ProgressionError::UnknownPhase(PhaseId::new(9))
        );
        assert_eq!(
            toggle_task(&s, PhaseId::new(2), TaskId::new(3)).unwrap_err(),
            ProgressionError::UnknownTask {
                phase: PhaseId::new(2),
                task: TaskId::new(3)
            }
        );
    }

    #[test]
    fn gate_blocks_until_previous_phase_is_complete() {
        let s = default_structure();
        let err = check_toggle(&s, PhaseId::new(2), TaskId::new(1)).unwrap_err();
        assert!(err.is_gate_rejection());
        assert_eq!(
            err,
            ProgressionError::GateRejected {
                phase: PhaseId::new(2),
                blocking: PhaseId::new(1)
            }
        );

        let s = complete_phase(s, 1);
        assert!(can_toggle(&s, PhaseId::new(2), TaskId::new(1)));
        assert!(!can_toggle(&s, PhaseId::new(3), TaskId::new(1)));
    }

    #[test]
    fn gate_only_looks_at_the_immediate_predecessor() {
        // Phase 3 depends on phase 2 only; a missing phase 2 leaves it unconstrained.
        let s = ProgressSnapshot::new(vec![
            Phase::new(PhaseId::new(1), "A", vec![Task::new(TaskId::new(1), "a")]),
            Phase::new(PhaseId::new(3), "C", vec![Task::new(TaskId::new(1), "c")]),
        ])
        .unwrap();
        assert!(can_toggle(&s, PhaseId::new(3), TaskId::new(1)));
    }

    #[test]
    fn tasks_within_a_phase_toggle_in_any_order() {
        let s = default_structure();
        assert!(can_toggle(&s, PhaseId::new(1), TaskId::new(4)));
        let s = toggle_task(&s, PhaseId::new(1), TaskId::new(4)).unwrap();
        assert!(can_toggle(&s, PhaseId::new(1), TaskId::new(2)));
    }

    #[test]
    fn gate_rejects_unknown_task_in_first_phase() {
        let s = default_structure();
        assert!(!can_toggle(&s, PhaseId::new(1), TaskId::new(5)));
    }

    #[test]
    fn all_complete_requires_every_phase() {
        let mut s = default_structure();
        assert!(!is_all_complete(&s));
        for phase in 1..=3 {
            s = complete_phase(s, phase);
        }
        assert!(is_all_complete(&s));
        assert_eq!(s.completed_task_count(), 8);
    }

    #[test]
    fn reset_all_clears_everything() {
        let mut s = default_structure();
        for phase in 1..=3 {
            s = complete_phase(s, phase);
        }
        let reset = reset_all(&s);
        assert_eq!(reset, default_structure());
        assert_eq!(reset_all(&reset), reset);
    }

    #[test]
    fn toggling_without_the_gate_keeps_phase_flags_consistent() {
        let s = default_structure();
        assert!(!can_toggle(&s, PhaseId::new(3), TaskId::new(1)));
        let s = toggle_task(&s, PhaseId::new(3), TaskId::new(1)).unwrap();
        let s = toggle_task(&s, PhaseId::new(3), TaskId::new(2)).unwrap();
        let phase = s.phase(PhaseId::new(3)).unwrap();
        assert!(phase.is_completed());
        assert_eq!(phase.is_completed(), phase.all_tasks_completed());
    }
}
