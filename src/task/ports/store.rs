//! Store port for task persistence and partial updates.

use crate::task::domain::{Subtask, Task, TaskId, TaskPriority, TaskStatus, User, UserId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task row joined with its assignee and creator profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// The task aggregate.
    pub task: Task,
    /// Joined assignee profile, when the reference resolves.
    pub assignee: Option<User>,
    /// Joined creator profile, when the reference resolves.
    pub creator: Option<User>,
}

/// Closed set of partial updates the store accepts.
///
/// Every write the lifecycle services perform maps onto exactly one variant,
/// so transition outcomes are checked exhaustively at compile time instead
/// of travelling as untyped field maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPatch {
    /// Status-only update.
    Status(TaskStatus),
    /// Whole-list subtask overwrite.
    Subtasks(Vec<Subtask>),
    /// Combined status and subtask update, applied atomically.
    StatusAndSubtasks {
        /// New board status.
        status: TaskStatus,
        /// New subtask list.
        subtasks: Vec<Subtask>,
    },
    /// Detail-field update from the edit form.
    Details(TaskDetailsPatch),
}

/// Editable detail fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailsPatch {
    /// New title.
    pub title: String,
    /// New description, cleared when `None`.
    pub description: Option<String>,
    /// New priority.
    pub priority: TaskPriority,
    /// New assignee, cleared when `None`.
    pub assignee_id: Option<UserId>,
    /// New due date, cleared when `None`.
    pub due_date: Option<NaiveDate>,
}

/// Task persistence contract.
///
/// The store applies updates in receipt order per record; the services
/// serialize their own writes to the same task and never rely on
/// cross-record ordering.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetches a single task by id, with joined assignee and creator
    /// profiles.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the read fails.
    async fn fetch(&self, id: TaskId) -> TaskStoreResult<Option<TaskRecord>>;

    /// Applies a partial update to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist or
    /// [`TaskStoreError::Persistence`] when the write fails.
    async fn apply(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()>;

    /// Deletes a single task record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist or
    /// [`TaskStoreError::Persistence`] when the delete fails.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
