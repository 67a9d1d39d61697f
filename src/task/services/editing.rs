//! Task detail editing and deletion.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{Session, Task, TaskDomainError},
    ports::{TaskDetailsPatch, TaskPatch, TaskStore},
};
use mockable::Clock;
use std::sync::Arc;

/// Service editing task detail fields and deleting tasks.
///
/// Editing and deletion are restricted to administrators, the creator, and
/// the assignee; collaborators may change status but not details.
#[derive(Clone)]
pub struct TaskEditService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TaskEditService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new edit service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Applies edited detail fields to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when the actor may not
    /// edit the task, [`TaskServiceError::Domain`] for an empty title, and
    /// [`TaskServiceError::Store`] when persistence fails; the caller's task
    /// is untouched in every failure case.
    pub async fn edit(
        &self,
        session: &Session,
        task: &Task,
        mut details: TaskDetailsPatch,
    ) -> TaskServiceResult<Task> {
        if !task.permits_edit(session.user()) {
            return Err(TaskServiceError::Unauthorized {
                user: session.user_id(),
                task: task.id(),
            });
        }
        details.title = details.title.trim().to_owned();
        if details.title.is_empty() {
            return Err(TaskDomainError::EmptyTaskTitle.into());
        }

        self.store
            .apply(task.id(), TaskPatch::Details(details.clone()))
            .await?;

        let mut updated = task.clone();
        updated.apply_details(
            details.title,
            details.description,
            details.priority,
            details.assignee_id,
            details.due_date,
            &*self.clock,
        );
        Ok(updated)
    }

    /// Deletes a task record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when the actor may not
    /// delete the task and [`TaskServiceError::Store`] when the delete
    /// fails.
    pub async fn delete(&self, session: &Session, task: &Task) -> TaskServiceResult<()> {
        if !task.permits_edit(session.user()) {
            return Err(TaskServiceError::Unauthorized {
                user: session.user_id(),
                task: task.id(),
            });
        }
        self.store.delete(task.id()).await?;
        Ok(())
    }
}
