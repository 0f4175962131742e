mod defaults;
mod ids;
mod phase;
mod snapshot;
mod task;

pub use defaults::default_structure;
pub use ids::{ParseIdError, PhaseId, TaskId};
pub use phase::Phase;
pub use snapshot::{ProgressSnapshot, SnapshotError};
pub use task::Task;
