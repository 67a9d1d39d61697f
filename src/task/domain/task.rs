//! Task aggregate root and related lifecycle types.

use super::{
    ParseTaskPriorityError, ParseTaskStatusError, Subtask, TaskDomainError, TaskId, Transition,
    User, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Pending,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Default urgency.
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Derived task progress; always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Completed subtasks.
    pub completed: usize,
    /// Total subtasks.
    pub total: usize,
    /// Rounded percentage; binary 0/100 from status when no subtasks exist.
    pub percent: u8,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    assignee_id: Option<UserId>,
    creator_id: Option<UserId>,
    due_date: Option<NaiveDate>,
}

impl NewTaskData {
    /// Creates task data with required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: TaskPriority) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority,
            assignee_id: None,
            creator_id: None,
            due_date: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the creator.
    #[must_use]
    pub const fn with_creator(mut self, creator_id: UserId) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    subtasks: Vec<Subtask>,
    assignee_id: Option<UserId>,
    creator_id: Option<UserId>,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted board status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted subtask list in display order.
    pub subtasks: Vec<Subtask>,
    /// Persisted assignee reference, if any.
    pub assignee_id: Option<UserId>,
    /// Persisted creator reference, if any.
    pub creator_id: Option<UserId>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task with no subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTaskTitle);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: title.to_owned(),
            description: data.description,
            status: TaskStatus::Pending,
            priority: data.priority,
            subtasks: Vec::new(),
            assignee_id: data.assignee_id,
            creator_id: data.creator_id,
            due_date: data.due_date,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            subtasks: data.subtasks,
            assignee_id: data.assignee_id,
            creator_id: data.creator_id,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the board status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the subtasks in display order.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the creator reference, if any.
    #[must_use]
    pub const fn creator_id(&self) -> Option<UserId> {
        self.creator_id
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Computes the derived progress of this task.
    ///
    /// With subtasks present the percentage is the rounded completion ratio;
    /// without subtasks it is binary from the board status.
    #[must_use]
    pub fn progress(&self) -> Progress {
        let total = self.subtasks.len();
        let completed = self
            .subtasks
            .iter()
            .filter(|subtask| subtask.completed())
            .count();
        let percent = if total == 0 {
            if self.status == TaskStatus::Completed { 100 } else { 0 }
        } else {
            rounded_percent(completed, total)
        };
        Progress {
            completed,
            total,
            percent,
        }
    }

    /// Returns whether the user may change this task's status.
    ///
    /// Administrators, the assignee, the creator, and listed collaborators
    /// may; anyone else may not.
    #[must_use]
    pub fn permits_status_change(&self, user: &User, collaborators: &[UserId]) -> bool {
        user.is_admin()
            || self.assignee_id == Some(user.id())
            || self.creator_id == Some(user.id())
            || collaborators.contains(&user.id())
    }

    /// Returns whether the user may edit or delete this task.
    #[must_use]
    pub fn permits_edit(&self, user: &User) -> bool {
        user.is_admin() || self.assignee_id == Some(user.id()) || self.creator_id == Some(user.id())
    }

    /// Applies a computed transition outcome to this aggregate.
    pub(crate) fn apply_transition(&mut self, transition: Transition, clock: &impl Clock) {
        self.status = transition.status;
        if let Some(subtasks) = transition.subtasks {
            self.subtasks = subtasks;
        }
        self.touch(clock);
    }

    /// Replaces the subtask list wholesale.
    pub(crate) fn set_subtasks(&mut self, subtasks: Vec<Subtask>, clock: &impl Clock) {
        self.subtasks = subtasks;
        self.touch(clock);
    }

    /// Applies edited detail fields.
    pub(crate) fn apply_details(
        &mut self,
        title: String,
        description: Option<String>,
        priority: TaskPriority,
        assignee_id: Option<UserId>,
        due_date: Option<NaiveDate>,
        clock: &impl Clock,
    ) {
        self.title = title;
        self.description = description;
        self.priority = priority;
        self.assignee_id = assignee_id;
        self.due_date = due_date;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Rounds `completed / total` to a whole percentage.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "half-up rounding to a whole percentage is deliberate truncating arithmetic"
)]
fn rounded_percent(completed: usize, total: usize) -> u8 {
    debug_assert!(total > 0);
    let scaled = completed.saturating_mul(100).saturating_add(total / 2) / total;
    u8::try_from(scaled).unwrap_or(100)
}
