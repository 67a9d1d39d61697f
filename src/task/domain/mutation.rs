//! Pure mutation operations over a task's subtask list.
//!
//! Each operation takes the full current list and returns the full new list;
//! callers persist the result as a whole-list overwrite. After every
//! operation except [`reorder_subtask`] the caller is expected to evaluate
//! the automatic status rules via
//! [`derive_auto_status`](super::derive_auto_status).

use super::subtask::validated_title;
use super::{Subtask, SubtaskId, TaskDomainError};

/// Appends a new incomplete subtask with the given title.
///
/// # Errors
///
/// Returns [`TaskDomainError::EmptySubtaskTitle`] when the title is empty or
/// whitespace; the input list is not consulted in that case.
pub fn add_subtask(
    subtasks: &[Subtask],
    title: impl Into<String>,
) -> Result<Vec<Subtask>, TaskDomainError> {
    let subtask = Subtask::new(title)?;
    let mut updated = subtasks.to_vec();
    updated.push(subtask);
    Ok(updated)
}

/// Flips the completion flag of the matching subtask.
///
/// # Errors
///
/// Returns [`TaskDomainError::SubtaskNotFound`] when no subtask carries the
/// identifier.
pub fn toggle_subtask(
    subtasks: &[Subtask],
    id: SubtaskId,
) -> Result<Vec<Subtask>, TaskDomainError> {
    let mut updated = subtasks.to_vec();
    let subtask = updated
        .iter_mut()
        .find(|subtask| subtask.id() == id)
        .ok_or(TaskDomainError::SubtaskNotFound(id))?;
    subtask.set_completed(!subtask.completed());
    Ok(updated)
}

/// Replaces the title of the matching subtask.
///
/// # Errors
///
/// Returns [`TaskDomainError::EmptySubtaskTitle`] for an empty title or
/// [`TaskDomainError::SubtaskNotFound`] when the identifier is absent.
pub fn rename_subtask(
    subtasks: &[Subtask],
    id: SubtaskId,
    title: impl Into<String>,
) -> Result<Vec<Subtask>, TaskDomainError> {
    let title = validated_title(title)?;
    let mut updated = subtasks.to_vec();
    let subtask = updated
        .iter_mut()
        .find(|subtask| subtask.id() == id)
        .ok_or(TaskDomainError::SubtaskNotFound(id))?;
    subtask.set_title(title);
    Ok(updated)
}

/// Removes the matching subtask from the list.
///
/// # Errors
///
/// Returns [`TaskDomainError::SubtaskNotFound`] when the identifier is
/// absent.
pub fn delete_subtask(
    subtasks: &[Subtask],
    id: SubtaskId,
) -> Result<Vec<Subtask>, TaskDomainError> {
    if !subtasks.iter().any(|subtask| subtask.id() == id) {
        return Err(TaskDomainError::SubtaskNotFound(id));
    }
    Ok(subtasks
        .iter()
        .filter(|subtask| subtask.id() != id)
        .cloned()
        .collect())
}

/// Moves the matching subtask to the target ordinal position, shifting the
/// others.
///
/// Reordering never changes a subtask's title or completion flag and never
/// triggers a status change; callers persist the new order only.
///
/// # Errors
///
/// Returns [`TaskDomainError::SubtaskNotFound`] when the identifier is
/// absent or [`TaskDomainError::PositionOutOfRange`] when the target
/// position is past the end of the list.
pub fn reorder_subtask(
    subtasks: &[Subtask],
    id: SubtaskId,
    target_position: usize,
) -> Result<Vec<Subtask>, TaskDomainError> {
    let current = subtasks
        .iter()
        .position(|subtask| subtask.id() == id)
        .ok_or(TaskDomainError::SubtaskNotFound(id))?;
    if target_position >= subtasks.len() {
        return Err(TaskDomainError::PositionOutOfRange {
            position: target_position,
            len: subtasks.len(),
        });
    }

    let mut updated = subtasks.to_vec();
    let moved = updated.remove(current);
    updated.insert(target_position, moved);
    Ok(updated)
}
