//! Port for per-record change notification.

use crate::task::domain::TaskId;
use tokio::sync::mpsc;

/// Change event pushed for a watched task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskChange {
    /// The record was updated; consumers re-fetch authoritative state.
    Updated(TaskId),
    /// The record was deleted.
    Deleted(TaskId),
}

impl TaskChange {
    /// Returns the task the event refers to.
    #[must_use]
    pub const fn task_id(self) -> TaskId {
        match self {
            Self::Updated(id) | Self::Deleted(id) => id,
        }
    }
}

/// Change-notification contract.
pub trait TaskEvents: Send + Sync {
    /// Opens a subscription scoped to a single task record.
    fn watch(&self, id: TaskId) -> TaskWatch;
}

/// Subscription handle yielding change events for one task.
///
/// Dropping the handle unsubscribes deterministically; no further events are
/// delivered or buffered for it.
pub struct TaskWatch {
    receiver: mpsc::UnboundedReceiver<TaskChange>,
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl TaskWatch {
    /// Creates a handle from a receiver and a teardown closure.
    ///
    /// Adapters call the closure exactly once, when the handle is dropped.
    #[must_use]
    pub fn new(
        receiver: mpsc::UnboundedReceiver<TaskChange>,
        unsubscribe: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Receives the next change event.
    ///
    /// Returns `None` when the publishing side has gone away.
    pub async fn recv(&mut self) -> Option<TaskChange> {
        self.receiver.recv().await
    }

    /// Receives a change event without waiting.
    ///
    /// Returns `None` when no event is queued.
    pub fn try_recv(&mut self) -> Option<TaskChange> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for TaskWatch {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for TaskWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskWatch").finish_non_exhaustive()
    }
}
