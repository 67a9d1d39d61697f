//! Port for task collaborator membership.

use crate::task::domain::{TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for collaborator store operations.
pub type CollaboratorStoreResult<T> = Result<T, CollaboratorStoreError>;

/// Outcome of adding a collaborator.
///
/// A duplicate add is a recoverable warning, not an error; the membership is
/// unchanged and callers surface it as "already a member".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorAdd {
    /// The user was added to the task.
    Added,
    /// The user was already a collaborator; nothing changed.
    AlreadyMember,
}

/// Collaborator membership contract.
#[async_trait]
pub trait CollaboratorStore: Send + Sync {
    /// Adds a user to a task's collaborators, idempotently.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorStoreError::Persistence`] when the write fails.
    async fn add(&self, task_id: TaskId, user_id: UserId)
    -> CollaboratorStoreResult<CollaboratorAdd>;

    /// Removes a user from a task's collaborators.
    ///
    /// Removing a non-member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorStoreError::Persistence`] when the write fails.
    async fn remove(&self, task_id: TaskId, user_id: UserId) -> CollaboratorStoreResult<()>;

    /// Lists the collaborators of a task.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorStoreError::Persistence`] when the read fails.
    async fn list(&self, task_id: TaskId) -> CollaboratorStoreResult<Vec<UserId>>;
}

/// Errors returned by collaborator store implementations.
#[derive(Debug, Clone, Error)]
pub enum CollaboratorStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CollaboratorStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
