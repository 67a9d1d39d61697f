//! Domain model for the task/subtask lifecycle.
//!
//! The domain owns the status enums, the subtask list and its mutation
//! operations, and the transition engine coupling subtask completion to task
//! status, while keeping all infrastructure concerns outside of the domain
//! boundary.

mod error;
mod ids;
mod mutation;
mod subtask;
mod task;
mod transition;
mod user;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{SubtaskId, TaskId, UserId};
pub use mutation::{add_subtask, delete_subtask, rename_subtask, reorder_subtask, toggle_subtask};
pub use subtask::Subtask;
pub use task::{NewTaskData, PersistedTaskData, Progress, Task, TaskPriority, TaskStatus};
pub use transition::{apply_manual_status_change, derive_auto_status, StatusNotice, Transition};
pub use user::{Session, User, UserRole};
