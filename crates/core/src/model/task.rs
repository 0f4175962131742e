use serde::Serialize;

use crate::model::ids::TaskId;

/// A leaf unit of work within a phase; the unit a user toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    content: String,
    completed: bool,
}

impl Task {
    /// Creates an incomplete task.
    #[must_use]
    pub fn new(id: TaskId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            completed: false,
        }
    }

    /// Same task with the given completion flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
