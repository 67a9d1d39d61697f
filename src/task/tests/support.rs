//! Shared fixtures for task lifecycle tests.

use crate::task::domain::{
    PersistedTaskData, Session, Subtask, Task, TaskId, TaskPriority, TaskStatus, User, UserId,
    UserRole,
};
use chrono::Utc;

/// Builds a subtask with a known completion flag.
pub fn subtask(title: &str, completed: bool) -> Subtask {
    let mut subtask = Subtask::new(title).expect("valid subtask title");
    subtask.set_completed(completed);
    subtask
}

/// Builds a subtask list from `(title, completed)` pairs.
pub fn subtask_list(specs: &[(&str, bool)]) -> Vec<Subtask> {
    specs
        .iter()
        .map(|(title, completed)| subtask(title, *completed))
        .collect()
}

/// Reconstructs a task in an arbitrary lifecycle state.
pub fn make_task(status: TaskStatus, subtasks: Vec<Subtask>) -> Task {
    make_owned_task(status, subtasks, None, None)
}

/// Reconstructs a task with explicit creator/assignee references.
pub fn make_owned_task(
    status: TaskStatus,
    subtasks: Vec<Subtask>,
    creator_id: Option<UserId>,
    assignee_id: Option<UserId>,
) -> Task {
    let now = Utc::now();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: "Quarterly report".to_owned(),
        description: None,
        status,
        priority: TaskPriority::Medium,
        subtasks,
        assignee_id,
        creator_id,
        due_date: None,
        created_at: now,
        updated_at: now,
    })
}

/// Builds a user with the given role.
pub fn user_with_role(role: UserRole) -> User {
    User::new(UserId::new(), "Dana Ishii", "dana@example.com", role)
}

/// Opens a session for a fresh employee account.
pub fn employee_session() -> Session {
    Session::new(user_with_role(UserRole::Employee))
}

/// Opens a session for a fresh admin account.
pub fn admin_session() -> Session {
    Session::new(user_with_role(UserRole::Admin))
}

/// Returns the completion flags of a subtask list, in order.
pub fn completion_flags(subtasks: &[Subtask]) -> Vec<bool> {
    subtasks.iter().map(Subtask::completed).collect()
}

/// Returns the titles of a subtask list, in order.
pub fn titles(subtasks: &[Subtask]) -> Vec<&str> {
    subtasks.iter().map(Subtask::title).collect()
}
