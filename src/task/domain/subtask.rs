//! Subtask checklist items owned by a task.

use super::{SubtaskId, TaskDomainError};
use serde::{Deserialize, Serialize};

/// Ordered checklist item owned by exactly one task.
///
/// Subtasks have no identity outside their parent task record; the whole
/// list is read and written as one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    title: String,
    completed: bool,
}

impl Subtask {
    /// Creates an incomplete subtask with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubtaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        let title = validated_title(title)?;
        Ok(Self {
            id: SubtaskId::new(),
            title,
            completed: false,
        })
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the subtask has been checked off.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    pub(crate) const fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }
}

/// Trims a candidate subtask title, rejecting empty input.
pub(crate) fn validated_title(title: impl Into<String>) -> Result<String, TaskDomainError> {
    let title = title.into();
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptySubtaskTitle);
    }
    Ok(trimmed.to_owned())
}
