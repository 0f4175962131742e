use crate::model::ids::{PhaseId, TaskId};
use crate::model::phase::Phase;
use crate::model::snapshot::ProgressSnapshot;
use crate::model::task::Task;

/// The built-in startup roadmap: three phases with 4, 2 and 2 tasks, all incomplete.
///
/// Its shape is authoritative during rehydration.
#[must_use]
pub fn default_structure() -> ProgressSnapshot {
    ProgressSnapshot::from_trusted(vec![
        phase(
            1,
            "Foundation",
            &[
                "Setup virtual office",
                "Set mission & visions",
                "Select business name",
                "Buy domains",
            ],
        ),
        phase(2, "Discovery", &["Create roadmap", "Competitor analysis"]),
        phase(3, "Delivery", &["Release marketing website", "Release MVP"]),
    ])
}

fn phase(id: u32, name: &str, tasks: &[&str]) -> Phase {
    let tasks = tasks
        .iter()
        .zip(1..)
        .map(|(content, task_id)| Task::new(TaskId::new(task_id), *content))
        .collect();
    Phase::new(PhaseId::new(id), name, tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_structure_shape() {
        let snapshot = default_structure();
        let shape: Vec<(u32, &str, usize)> = snapshot
            .phases()
            .iter()
            .map(|p| (p.id().value(), p.name(), p.tasks().len()))
            .collect();
        assert_eq!(
            shape,
            vec![(1, "Foundation", 4), (2, "Discovery", 2), (3, "Delivery", 2)]
        );
        assert_eq!(snapshot.completed_task_count(), 0);
    }

    #[test]
    fn default_structure_passes_id_validation() {
        let snapshot = default_structure();
        let rebuilt = ProgressSnapshot::new(snapshot.phases().to_vec()).unwrap();
        assert_eq!(rebuilt, snapshot);
    }
}
