//! Optimistic board reconciler for drag-initiated status moves.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{apply_manual_status_change, Session, StatusNotice, Task, TaskId, TaskStatus},
    ports::{CollaboratorStore, TaskChange, TaskPatch, TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of a board move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was confirmed by the store.
    Moved {
        /// Notice raised when the move touched subtasks.
        notice: Option<StatusNotice>,
    },
    /// Source and target column were the same; nothing happened.
    NoOp,
}

/// Local board view applying optimistic status moves with
/// confirm-or-resync semantics.
///
/// A drag is applied to the local view before the store confirms it. On
/// store failure the task is re-fetched and the authoritative state replaces
/// the optimistic value; no inverse patch is attempted. Board moves are
/// routed through the status transition engine, so the completed-state
/// subtask side effects apply to drags exactly as to dropdown changes.
pub struct BoardReconciler<S, M, C>
where
    S: TaskStore,
    M: CollaboratorStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    collaborators: Arc<M>,
    clock: Arc<C>,
    tasks: HashMap<TaskId, Task>,
}

impl<S, M, C> BoardReconciler<S, M, C>
where
    S: TaskStore,
    M: CollaboratorStore,
    C: Clock + Send + Sync,
{
    /// Creates an empty board.
    #[must_use]
    pub fn new(store: Arc<S>, collaborators: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            store,
            collaborators,
            clock,
            tasks: HashMap::new(),
        }
    }

    /// Inserts or replaces a task in the local view.
    pub fn insert(&mut self, task: Task) {
        self.tasks.insert(task.id(), task);
    }

    /// Returns a task from the local view.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Returns the tasks currently in a column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|task| task.status() == status)
            .collect()
    }

    /// Returns the number of tasks in the local view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the local view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Handles a drag-completion event moving a task to a target column.
    ///
    /// The new status is applied to the local view before the store write.
    /// On write failure the optimistic value is discarded in favour of an
    /// authoritative re-fetch and the store error is surfaced.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] with
    /// [`TaskStoreError::NotFound`] for a task absent from the local view,
    /// [`TaskServiceError::Unauthorized`] when the actor may not move the
    /// task, and [`TaskServiceError::Store`] when the confirming write
    /// failed (after the local view has been re-synchronized).
    pub async fn move_task(
        &mut self,
        session: &Session,
        id: TaskId,
        target: TaskStatus,
    ) -> TaskServiceResult<MoveOutcome> {
        let Some(task) = self.tasks.get(&id).cloned() else {
            return Err(TaskServiceError::Store(TaskStoreError::NotFound(id)));
        };
        if task.status() == target {
            return Ok(MoveOutcome::NoOp);
        }

        // Collaborator membership is only consulted when the cheap
        // admin/assignee/creator checks fail.
        if !task.permits_status_change(session.user(), &[]) {
            let collaborators = self.collaborators.list(id).await?;
            if !task.permits_status_change(session.user(), &collaborators) {
                return Err(TaskServiceError::Unauthorized {
                    user: session.user_id(),
                    task: id,
                });
            }
        }

        let transition = apply_manual_status_change(task.status(), task.subtasks(), target);
        let notice = transition.notice;
        let patch = match &transition.subtasks {
            Some(subtasks) => TaskPatch::StatusAndSubtasks {
                status: transition.status,
                subtasks: subtasks.clone(),
            },
            None => TaskPatch::Status(transition.status),
        };

        // Optimistic local apply, before any network confirmation.
        let mut optimistic = task;
        optimistic.apply_transition(transition, &*self.clock);
        self.tasks.insert(id, optimistic);

        match self.store.apply(id, patch).await {
            Ok(()) => Ok(MoveOutcome::Moved { notice }),
            Err(err) => {
                self.resync(id).await;
                Err(err.into())
            }
        }
    }

    /// Re-fetches authoritative state for a task, last-fetch-wins.
    ///
    /// Used by change-notification consumers; fetch failures are logged and
    /// not surfaced, leaving the local view as it was.
    pub async fn refresh(&mut self, id: TaskId) {
        match self.store.fetch(id).await {
            Ok(Some(record)) => {
                self.tasks.insert(id, record.task);
            }
            Ok(None) => {
                self.tasks.remove(&id);
            }
            Err(err) => {
                tracing::warn!(task_id = %id, error = %err, "board refresh failed");
            }
        }
    }

    /// Applies a pushed change event to the local view.
    pub async fn handle_change(&mut self, change: TaskChange) {
        match change {
            TaskChange::Updated(id) => self.refresh(id).await,
            TaskChange::Deleted(id) => {
                self.tasks.remove(&id);
            }
        }
    }

    /// Replaces the optimistic value with authoritative state after a failed
    /// write. A task that cannot be re-fetched is evicted rather than left
    /// showing an unconfirmed status.
    async fn resync(&mut self, id: TaskId) {
        match self.store.fetch(id).await {
            Ok(Some(record)) => {
                self.tasks.insert(id, record.task);
            }
            Ok(None) => {
                self.tasks.remove(&id);
            }
            Err(err) => {
                tracing::warn!(task_id = %id, error = %err, "board resync failed, evicting task");
                self.tasks.remove(&id);
            }
        }
    }
}
