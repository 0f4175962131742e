use serde::Serialize;

use crate::model::ids::{PhaseId, TaskId};
use crate::model::task::Task;

/// An ordered stage of work. Its `completed` flag is derived from its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    id: PhaseId,
    name: String,
    completed: bool,
    tasks: Vec<Task>,
}

impl Phase {
    /// Creates a phase; the completion flag is computed from `tasks`.
    #[must_use]
    pub fn new(id: PhaseId, name: impl Into<String>, tasks: Vec<Task>) -> Self {
        let mut phase = Self {
            id,
            name: name.into(),
            completed: false,
            tasks,
        };
        phase.recompute_completion();
        phase
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> PhaseId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored completion flag.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// True when every task is completed. Vacuously true for an empty phase.
    #[must_use]
    pub fn all_tasks_completed(&self) -> bool {
        self.tasks.iter().all(Task::is_completed)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_completed()).count()
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    pub(crate) fn recompute_completion(&mut self) {
        self.completed = self.all_tasks_completed();
    }

    pub(crate) fn set_all_tasks(&mut self, completed: bool) {
        for task in &mut self.tasks {
            task.set_completed(completed);
        }
        self.recompute_completion();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(flags: &[bool]) -> Phase {
        let tasks = flags
            .iter()
            .zip(1..)
            .map(|(done, id)| Task::new(TaskId::new(id), format!("task {id}")).with_completed(*done))
            .collect();
        Phase::new(PhaseId::new(1), "Foundation", tasks)
    }

    #[test]
    fn completion_is_derived_on_construction() {
        assert!(!phase(&[true, false]).is_completed());
        assert!(phase(&[true, true]).is_completed());
    }

    #[test]
    fn empty_phase_counts_as_complete() {
        assert!(phase(&[]).is_completed());
    }

    #[test]
    fn set_all_tasks_keeps_flag_in_sync() {
        let mut p = phase(&[false, true, false]);
        p.set_all_tasks(true);
        assert!(p.is_completed());
        assert_eq!(p.completed_count(), 3);

        p.set_all_tasks(false);
        assert!(!p.is_completed());
        assert_eq!(p.completed_count(), 0);
    }

    #[test]
    fn looks_up_tasks_by_id() {
        let p = phase(&[false, true]);
        assert!(p.task(TaskId::new(2)).is_some_and(Task::is_completed));
        assert!(p.task(TaskId::new(9)).is_none());
    }
}
