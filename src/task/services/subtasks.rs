//! Subtask list orchestration: mutate, auto-transition, persist.

use super::TaskServiceResult;
use crate::task::{
    domain::{
        add_subtask, delete_subtask, derive_auto_status, rename_subtask, reorder_subtask,
        toggle_subtask, StatusNotice, Subtask, SubtaskId, Task,
    },
    ports::{TaskPatch, TaskStore},
};
use mockable::Clock;
use std::sync::Arc;

/// Outcome of a subtask operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskChange {
    /// The task with the new subtask list (and any auto status change)
    /// applied.
    pub task: Task,
    /// Notice raised when the mutation auto-transitioned the task.
    pub notice: Option<StatusNotice>,
}

/// Service applying subtask mutations.
///
/// Every operation persists the full recomputed list as a whole-list
/// overwrite; concurrent edits to the same task are expected to be
/// serialized by the caller. After every operation except reorder the
/// automatic status rules run against the new list and any resulting status
/// change persists in the same update.
#[derive(Clone)]
pub struct SubtaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> SubtaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new subtask service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Appends a new subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`](super::TaskServiceError::Domain)
    /// for an empty title, before any store interaction, and
    /// [`TaskServiceError::Store`](super::TaskServiceError::Store) when
    /// persistence fails.
    pub async fn add(
        &self,
        task: &Task,
        title: impl Into<String> + Send,
    ) -> TaskServiceResult<SubtaskChange> {
        let subtasks = add_subtask(task.subtasks(), title)?;
        self.commit(task, subtasks, true).await
    }

    /// Flips the completion flag of a subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`](super::TaskServiceError::Domain)
    /// when the subtask is absent and
    /// [`TaskServiceError::Store`](super::TaskServiceError::Store) when
    /// persistence fails.
    pub async fn toggle(&self, task: &Task, id: SubtaskId) -> TaskServiceResult<SubtaskChange> {
        let subtasks = toggle_subtask(task.subtasks(), id)?;
        self.commit(task, subtasks, true).await
    }

    /// Renames a subtask.
    ///
    /// # Errors
    ///
    /// As [`add`](Self::add) and [`toggle`](Self::toggle) combined.
    pub async fn rename(
        &self,
        task: &Task,
        id: SubtaskId,
        title: impl Into<String> + Send,
    ) -> TaskServiceResult<SubtaskChange> {
        let subtasks = rename_subtask(task.subtasks(), id, title)?;
        self.commit(task, subtasks, true).await
    }

    /// Deletes a subtask.
    ///
    /// Deleting the last incomplete subtask can auto-complete the task.
    ///
    /// # Errors
    ///
    /// As [`toggle`](Self::toggle).
    pub async fn delete(&self, task: &Task, id: SubtaskId) -> TaskServiceResult<SubtaskChange> {
        let subtasks = delete_subtask(task.subtasks(), id)?;
        self.commit(task, subtasks, true).await
    }

    /// Moves a subtask to a new ordinal position.
    ///
    /// Reordering persists the new order only and never changes status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`](super::TaskServiceError::Domain)
    /// for an absent subtask or out-of-range position and
    /// [`TaskServiceError::Store`](super::TaskServiceError::Store) when
    /// persistence fails.
    pub async fn reorder(
        &self,
        task: &Task,
        id: SubtaskId,
        target_position: usize,
    ) -> TaskServiceResult<SubtaskChange> {
        let subtasks = reorder_subtask(task.subtasks(), id, target_position)?;
        self.commit(task, subtasks, false).await
    }

    /// Persists the recomputed list, folding in any automatic status change.
    async fn commit(
        &self,
        task: &Task,
        subtasks: Vec<Subtask>,
        evaluate_auto: bool,
    ) -> TaskServiceResult<SubtaskChange> {
        let auto = if evaluate_auto {
            derive_auto_status(task.status(), &subtasks)
        } else {
            None
        };

        let patch = match &auto {
            Some(transition) => TaskPatch::StatusAndSubtasks {
                status: transition.status,
                subtasks: subtasks.clone(),
            },
            None => TaskPatch::Subtasks(subtasks.clone()),
        };
        self.store.apply(task.id(), patch).await?;

        let mut updated = task.clone();
        updated.set_subtasks(subtasks, &*self.clock);
        let notice = match auto {
            Some(transition) => {
                let notice = transition.notice;
                updated.apply_transition(transition, &*self.clock);
                notice
            }
            None => None,
        };
        Ok(SubtaskChange {
            task: updated,
            notice,
        })
    }
}
