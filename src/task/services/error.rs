//! Service-level errors for task lifecycle operations.

use crate::task::domain::{TaskDomainError, TaskId, UserId};
use crate::task::ports::{CollaboratorStoreError, TaskStoreError};
use thiserror::Error;

/// Errors surfaced by the task lifecycle services.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The acting user lacks permission for the operation.
    #[error("user {user} is not allowed to modify task {task}")]
    Unauthorized {
        /// Acting user.
        user: UserId,
        /// Target task.
        task: TaskId,
    },

    /// Domain validation failed; no store interaction took place.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task store rejected the operation.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// The collaborator store rejected the operation.
    #[error(transparent)]
    Collaborators(#[from] CollaboratorStoreError),
}

/// Result type for task lifecycle service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
