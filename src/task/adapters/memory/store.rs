//! Thread-safe in-memory implementation of the task lifecycle ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, User, UserId},
    ports::{
        CollaboratorAdd, CollaboratorStore, CollaboratorStoreError, CollaboratorStoreResult,
        TaskChange, TaskEvents, TaskPatch, TaskRecord, TaskStore, TaskStoreError, TaskStoreResult,
        TaskWatch,
    },
};

/// In-memory task store implementing persistence, collaborator membership,
/// and change notification.
///
/// Writes can be switched to fail for rollback testing via
/// [`set_fail_writes`](Self::set_fail_writes).
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: HashMap<TaskId, Task>,
    users: HashMap<UserId, User>,
    collaborators: HashMap<TaskId, Vec<UserId>>,
    watchers: HashMap<TaskId, Vec<Watcher>>,
    next_watcher: u64,
    fail_writes: bool,
}

#[derive(Debug)]
struct Watcher {
    id: u64,
    sender: mpsc::UnboundedSender<TaskChange>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a task record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn insert_task(&self, task: Task) -> TaskStoreResult<()> {
        let mut state = write_state(&self.state)?;
        state.tasks.insert(task.id(), task);
        Ok(())
    }

    /// Seeds a user profile for joined fetches.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn insert_user(&self, user: User) -> TaskStoreResult<()> {
        let mut state = write_state(&self.state)?;
        state.users.insert(user.id(), user);
        Ok(())
    }

    /// Makes subsequent task writes fail, or restores them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn set_fail_writes(&self, fail: bool) -> TaskStoreResult<()> {
        let mut state = write_state(&self.state)?;
        state.fail_writes = fail;
        Ok(())
    }

    /// Returns the number of live watchers for a task.
    #[must_use]
    pub fn watcher_count(&self, id: TaskId) -> usize {
        self.state
            .read()
            .map(|state| state.watchers.get(&id).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn notify(state: &mut StoreState, change: TaskChange) {
        if let Some(watchers) = state.watchers.get_mut(&change.task_id()) {
            watchers.retain(|watcher| watcher.sender.send(change).is_ok());
        }
    }
}

fn write_state(
    state: &Arc<RwLock<StoreState>>,
) -> Result<std::sync::RwLockWriteGuard<'_, StoreState>, TaskStoreError> {
    state
        .write()
        .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
}

fn read_state(
    state: &Arc<RwLock<StoreState>>,
) -> Result<std::sync::RwLockReadGuard<'_, StoreState>, TaskStoreError> {
    state
        .read()
        .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
}

/// Error used for injected write failures.
#[derive(Debug, thiserror::Error)]
#[error("write rejected by store")]
struct WriteRejected;

fn patched(task: &Task, patch: TaskPatch) -> Task {
    let mut data = PersistedTaskData {
        id: task.id(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status(),
        priority: task.priority(),
        subtasks: task.subtasks().to_vec(),
        assignee_id: task.assignee_id(),
        creator_id: task.creator_id(),
        due_date: task.due_date(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    };
    match patch {
        TaskPatch::Status(status) => data.status = status,
        TaskPatch::Subtasks(subtasks) => data.subtasks = subtasks,
        TaskPatch::StatusAndSubtasks { status, subtasks } => {
            data.status = status;
            data.subtasks = subtasks;
        }
        TaskPatch::Details(details) => {
            data.title = details.title;
            data.description = details.description;
            data.priority = details.priority;
            data.assignee_id = details.assignee_id;
            data.due_date = details.due_date;
        }
    }
    Task::from_persisted(data)
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn fetch(&self, id: TaskId) -> TaskStoreResult<Option<TaskRecord>> {
        let state = read_state(&self.state)?;
        let Some(task) = state.tasks.get(&id).cloned() else {
            return Ok(None);
        };
        let assignee = task
            .assignee_id()
            .and_then(|user_id| state.users.get(&user_id).cloned());
        let creator = task
            .creator_id()
            .and_then(|user_id| state.users.get(&user_id).cloned());
        Ok(Some(TaskRecord {
            task,
            assignee,
            creator,
        }))
    }

    async fn apply(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        let mut state = write_state(&self.state)?;
        if state.fail_writes {
            return Err(TaskStoreError::persistence(WriteRejected));
        }
        let task = state.tasks.get(&id).ok_or(TaskStoreError::NotFound(id))?;
        let updated = patched(task, patch);
        state.tasks.insert(id, updated);
        Self::notify(&mut state, TaskChange::Updated(id));
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = write_state(&self.state)?;
        if state.fail_writes {
            return Err(TaskStoreError::persistence(WriteRejected));
        }
        if state.tasks.remove(&id).is_none() {
            return Err(TaskStoreError::NotFound(id));
        }
        state.collaborators.remove(&id);
        Self::notify(&mut state, TaskChange::Deleted(id));
        Ok(())
    }
}

#[async_trait]
impl CollaboratorStore for InMemoryTaskStore {
    async fn add(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> CollaboratorStoreResult<CollaboratorAdd> {
        let mut state = self.state.write().map_err(|err| {
            CollaboratorStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let members = state.collaborators.entry(task_id).or_default();
        if members.contains(&user_id) {
            return Ok(CollaboratorAdd::AlreadyMember);
        }
        members.push(user_id);
        Ok(CollaboratorAdd::Added)
    }

    async fn remove(&self, task_id: TaskId, user_id: UserId) -> CollaboratorStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            CollaboratorStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if let Some(members) = state.collaborators.get_mut(&task_id) {
            members.retain(|member| *member != user_id);
        }
        Ok(())
    }

    async fn list(&self, task_id: TaskId) -> CollaboratorStoreResult<Vec<UserId>> {
        let state = self.state.read().map_err(|err| {
            CollaboratorStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.collaborators.get(&task_id).cloned().unwrap_or_default())
    }
}

impl TaskEvents for InMemoryTaskStore {
    fn watch(&self, id: TaskId) -> TaskWatch {
        let (sender, receiver) = mpsc::unbounded_channel();
        let watcher_id = {
            let mut guard = match self.state.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let watcher_id = guard.next_watcher;
            guard.next_watcher = guard.next_watcher.wrapping_add(1);
            guard
                .watchers
                .entry(id)
                .or_default()
                .push(Watcher { id: watcher_id, sender });
            watcher_id
        };

        let state = Arc::clone(&self.state);
        TaskWatch::new(receiver, move || {
            let mut guard = match state.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some(watchers) = guard.watchers.get_mut(&id) {
                watchers.retain(|watcher| watcher.id != watcher_id);
                if watchers.is_empty() {
                    guard.watchers.remove(&id);
                }
            }
        })
    }
}
