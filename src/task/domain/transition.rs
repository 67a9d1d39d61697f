//! Status transition engine coupling subtask completion to task status.
//!
//! Two entry points cover the two ways a status can change:
//!
//! - [`apply_manual_status_change`] handles a status requested directly by a
//!   user (dropdown or board drag) and computes the subtask side effects of
//!   leaving or entering the completed state.
//! - [`derive_auto_status`] handles the automatic rules evaluated after a
//!   subtask mutation: full completion pulls the task to completed, and an
//!   incomplete entry pushes a completed task back to in-progress.
//!
//! Both are pure; persistence of the outcome belongs to the services.

use super::{Subtask, TaskStatus};
use std::fmt;

/// Informational notice accompanying a transition that touched more than the
/// requested status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusNotice {
    /// All subtasks were force-completed by a manual move to completed.
    SubtasksForceCompleted,
    /// The last completed subtask was reopened by a manual move back to
    /// in-progress.
    LastSubtaskReopened,
    /// Every subtask was reset by a manual move back to pending.
    SubtasksReset,
    /// Full subtask completion auto-completed the task.
    AutoCompleted,
    /// An incomplete subtask auto-reverted the task to in-progress.
    AutoReverted,
}

impl fmt::Display for StatusNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::SubtasksForceCompleted => "all subtasks were marked completed",
            Self::LastSubtaskReopened => "the last completed subtask was reopened",
            Self::SubtasksReset => "all subtasks were reset to incomplete",
            Self::AutoCompleted => "all subtasks completed, task marked completed",
            Self::AutoReverted => "subtasks incomplete, task reverted to in progress",
        };
        f.write_str(text)
    }
}

/// Outcome of a status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Status the task moves to.
    pub status: TaskStatus,
    /// Rewritten subtask list, when the transition had subtask side effects.
    pub subtasks: Option<Vec<Subtask>>,
    /// Informational notice for the user, when one applies.
    pub notice: Option<StatusNotice>,
}

impl Transition {
    /// A transition that only changes status.
    const fn status_only(status: TaskStatus) -> Self {
        Self {
            status,
            subtasks: None,
            notice: None,
        }
    }
}

/// Computes the outcome of a user-requested status change.
///
/// Rules, in precedence order:
///
/// - requesting the current status is an identity transition;
/// - moving to completed force-completes any incomplete subtasks;
/// - moving completed → in-progress reopens exactly the last completed
///   subtask (list order); the list is untouched when none are completed;
/// - moving completed → pending resets every subtask to incomplete;
/// - any other change leaves the subtasks untouched.
#[must_use]
pub fn apply_manual_status_change(
    current: TaskStatus,
    subtasks: &[Subtask],
    requested: TaskStatus,
) -> Transition {
    if requested == current {
        return Transition::status_only(current);
    }
    if subtasks.is_empty() {
        return Transition::status_only(requested);
    }

    match (current, requested) {
        (_, TaskStatus::Completed) => force_complete(subtasks),
        (TaskStatus::Completed, TaskStatus::InProgress) => reopen_last_completed(subtasks),
        (TaskStatus::Completed, TaskStatus::Pending) => reset_all(subtasks),
        _ => Transition::status_only(requested),
    }
}

/// Evaluates the automatic rules after a subtask mutation.
///
/// Returns `None` when the current status already agrees with the subtask
/// list. An empty list never triggers an automatic change.
#[must_use]
pub fn derive_auto_status(current: TaskStatus, subtasks: &[Subtask]) -> Option<Transition> {
    if subtasks.is_empty() {
        return None;
    }

    let all_completed = subtasks.iter().all(Subtask::completed);
    if all_completed && current != TaskStatus::Completed {
        return Some(Transition {
            status: TaskStatus::Completed,
            subtasks: None,
            notice: Some(StatusNotice::AutoCompleted),
        });
    }
    if !all_completed && current == TaskStatus::Completed {
        return Some(Transition {
            status: TaskStatus::InProgress,
            subtasks: None,
            notice: Some(StatusNotice::AutoReverted),
        });
    }
    None
}

fn force_complete(subtasks: &[Subtask]) -> Transition {
    if subtasks.iter().all(Subtask::completed) {
        return Transition::status_only(TaskStatus::Completed);
    }

    let mut updated = subtasks.to_vec();
    for subtask in &mut updated {
        subtask.set_completed(true);
    }
    Transition {
        status: TaskStatus::Completed,
        subtasks: Some(updated),
        notice: Some(StatusNotice::SubtasksForceCompleted),
    }
}

/// Reopens the last completed subtask by current list order.
///
/// Deliberately asymmetric with [`force_complete`]: only one subtask is
/// reopened, matching the product behaviour of stepping a task back a single
/// increment.
fn reopen_last_completed(subtasks: &[Subtask]) -> Transition {
    let mut updated = subtasks.to_vec();
    let Some(last_completed) = updated.iter_mut().rev().find(|subtask| subtask.completed())
    else {
        // Completed status without completed subtasks: set manually before
        // subtasks were added. Leave the list alone.
        return Transition::status_only(TaskStatus::InProgress);
    };
    last_completed.set_completed(false);
    Transition {
        status: TaskStatus::InProgress,
        subtasks: Some(updated),
        notice: Some(StatusNotice::LastSubtaskReopened),
    }
}

fn reset_all(subtasks: &[Subtask]) -> Transition {
    let mut updated = subtasks.to_vec();
    for subtask in &mut updated {
        subtask.set_completed(false);
    }
    Transition {
        status: TaskStatus::Pending,
        subtasks: Some(updated),
        notice: Some(StatusNotice::SubtasksReset),
    }
}
