//! Error types for task domain validation and parsing.

use super::SubtaskId;
use thiserror::Error;

/// Errors returned while validating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The subtask title is empty after trimming.
    #[error("subtask title must not be empty")]
    EmptySubtaskTitle,

    /// The referenced subtask does not exist on the task.
    #[error("subtask not found: {0}")]
    SubtaskNotFound(SubtaskId),

    /// The requested reorder position is outside the list bounds.
    #[error("subtask position {position} is out of range for a list of {len}")]
    PositionOutOfRange {
        /// Requested ordinal position.
        position: usize,
        /// Current list length.
        len: usize,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
