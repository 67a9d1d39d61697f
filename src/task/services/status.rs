//! Manual status change orchestration.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{apply_manual_status_change, Session, StatusNotice, Task, TaskStatus},
    ports::{CollaboratorStore, TaskPatch, TaskStore},
};
use mockable::Clock;
use std::sync::Arc;

/// Outcome of a manual status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// The task with the transition applied.
    pub task: Task,
    /// Informational notice, when the transition touched subtasks.
    pub notice: Option<StatusNotice>,
}

/// Service applying user-requested status changes.
///
/// The caller's task value is never mutated; the updated aggregate is
/// returned only after the store confirmed the write, so a persistence
/// failure leaves in-memory state at its pre-change value.
#[derive(Clone)]
pub struct StatusService<S, M, C>
where
    S: TaskStore,
    M: CollaboratorStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    collaborators: Arc<M>,
    clock: Arc<C>,
}

impl<S, M, C> StatusService<S, M, C>
where
    S: TaskStore,
    M: CollaboratorStore,
    C: Clock + Send + Sync,
{
    /// Creates a new status service.
    #[must_use]
    pub const fn new(store: Arc<S>, collaborators: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            store,
            collaborators,
            clock,
        }
    }

    /// Applies a user-requested status change to a task.
    ///
    /// The transition engine decides the subtask side effects; status and
    /// rewritten subtasks persist as one partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when the actor is neither
    /// an administrator, the assignee, the creator, nor a collaborator, and
    /// [`TaskServiceError::Store`] when persistence fails; in both cases no
    /// state has changed.
    pub async fn change_status(
        &self,
        session: &Session,
        task: &Task,
        requested: TaskStatus,
    ) -> TaskServiceResult<StatusChange> {
        // Collaborator membership is only consulted when the cheap
        // admin/assignee/creator checks fail.
        if !task.permits_status_change(session.user(), &[]) {
            let collaborators = self.collaborators.list(task.id()).await?;
            if !task.permits_status_change(session.user(), &collaborators) {
                return Err(TaskServiceError::Unauthorized {
                    user: session.user_id(),
                    task: task.id(),
                });
            }
        }

        let transition = apply_manual_status_change(task.status(), task.subtasks(), requested);
        let patch = match &transition.subtasks {
            Some(subtasks) => TaskPatch::StatusAndSubtasks {
                status: transition.status,
                subtasks: subtasks.clone(),
            },
            None => TaskPatch::Status(transition.status),
        };
        self.store.apply(task.id(), patch).await?;

        let notice = transition.notice;
        let mut updated = task.clone();
        updated.apply_transition(transition, &*self.clock);
        Ok(StatusChange {
            task: updated,
            notice,
        })
    }
}
