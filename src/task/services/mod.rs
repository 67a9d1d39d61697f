//! Application services orchestrating the task lifecycle.

mod board;
mod editing;
mod error;
mod status;
mod subtasks;

pub use board::{BoardReconciler, MoveOutcome};
pub use editing::TaskEditService;
pub use error::{TaskServiceError, TaskServiceResult};
pub use status::{StatusChange, StatusService};
pub use subtasks::{SubtaskChange, SubtaskService};
