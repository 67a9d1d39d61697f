//! Domain-focused tests for task construction, progress, and permissions.

use super::support::{make_owned_task, make_task, subtask_list, user_with_role};
use crate::task::domain::{
    NewTaskData, ParseTaskStatusError, Task, TaskDomainError, TaskPriority, TaskStatus, UserId,
    UserRole,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[rstest]
fn new_task_starts_pending_with_no_subtasks(clock: DefaultClock) {
    let creator = UserId::new();
    let data = NewTaskData::new("  Ship the Q3 review  ", TaskPriority::High)
        .with_description("Collect department numbers")
        .with_creator(creator);

    let task = Task::new(data, &clock).expect("valid task data");

    assert_eq!(task.title(), "Ship the Q3 review");
    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.priority(), TaskPriority::High);
    assert!(task.subtasks().is_empty());
    assert_eq!(task.creator_id(), Some(creator));
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
#[case("")]
#[case("   ")]
fn new_task_rejects_blank_titles(#[case] title: &str, clock: DefaultClock) {
    let result = Task::new(NewTaskData::new(title, TaskPriority::Low), &clock);
    assert_eq!(result, Err(TaskDomainError::EmptyTaskTitle));
}

#[rstest]
#[case(&[("a", true), ("b", true)], 2, 2, 100)]
#[case(&[("a", true), ("b", false)], 1, 2, 50)]
#[case(&[("a", false), ("b", false), ("c", false)], 0, 3, 0)]
#[case(&[("a", true), ("b", true), ("c", false)], 2, 3, 67)]
fn progress_is_derived_from_subtask_completion(
    #[case] specs: &[(&str, bool)],
    #[case] completed: usize,
    #[case] total: usize,
    #[case] percent: u8,
) {
    let task = make_task(TaskStatus::InProgress, subtask_list(specs));

    let progress = task.progress();

    assert_eq!(progress.completed, completed);
    assert_eq!(progress.total, total);
    assert_eq!(progress.percent, percent);
}

#[rstest]
fn progress_hits_one_hundred_iff_every_subtask_is_completed() {
    let complete = make_task(TaskStatus::InProgress, subtask_list(&[("a", true)]));
    let incomplete = make_task(
        TaskStatus::Completed,
        subtask_list(&[("a", true), ("b", false)]),
    );

    assert_eq!(complete.progress().percent, 100);
    assert_ne!(incomplete.progress().percent, 100);
}

#[rstest]
#[case(TaskStatus::Completed, 100)]
#[case(TaskStatus::InProgress, 0)]
#[case(TaskStatus::Pending, 0)]
fn progress_without_subtasks_is_binary_from_status(
    #[case] status: TaskStatus,
    #[case] percent: u8,
) {
    let task = make_task(status, Vec::new());
    assert_eq!(task.progress().percent, percent);
}

#[rstest]
#[case(TaskStatus::Pending, "pending")]
#[case(TaskStatus::InProgress, "in_progress")]
#[case(TaskStatus::Completed, "completed")]
fn status_round_trips_through_storage_form(#[case] status: TaskStatus, #[case] text: &str) {
    assert_eq!(status.as_str(), text);
    assert_eq!(TaskStatus::try_from(text), Ok(status));
}

#[rstest]
fn status_parse_rejects_unknown_values() {
    assert_eq!(
        TaskStatus::try_from("archived"),
        Err(ParseTaskStatusError("archived".to_owned()))
    );
}

#[rstest]
#[case(TaskPriority::Low, "low")]
#[case(TaskPriority::Medium, "medium")]
#[case(TaskPriority::High, "high")]
fn priority_round_trips_through_storage_form(#[case] priority: TaskPriority, #[case] text: &str) {
    assert_eq!(priority.as_str(), text);
    assert_eq!(TaskPriority::try_from(text), Ok(priority));
}

#[rstest]
fn subtasks_serialize_to_the_stored_json_shape() {
    let subtasks = subtask_list(&[("draft outline", true)]);

    let value = serde_json::to_value(&subtasks).expect("serializable");

    let entry = value.get(0).expect("one entry");
    assert_eq!(entry.get("title"), Some(&serde_json::json!("draft outline")));
    assert_eq!(entry.get("completed"), Some(&serde_json::json!(true)));
    assert!(entry.get("id").is_some());

    let parsed: Vec<crate::task::domain::Subtask> =
        serde_json::from_value(value).expect("deserializable");
    assert_eq!(parsed, subtasks);
}

#[rstest]
fn status_serializes_to_snake_case() {
    assert_eq!(
        serde_json::to_value(TaskStatus::InProgress).expect("serializable"),
        serde_json::json!("in_progress")
    );
}

#[rstest]
fn admins_may_always_change_status() {
    let task = make_task(TaskStatus::Pending, Vec::new());
    let admin = user_with_role(UserRole::Admin);

    assert!(task.permits_status_change(&admin, &[]));
}

#[rstest]
fn assignee_and_creator_may_change_status() {
    let creator = UserId::new();
    let assignee = UserId::new();
    let task = make_owned_task(TaskStatus::Pending, Vec::new(), Some(creator), Some(assignee));

    let as_creator = crate::task::domain::User::new(
        creator,
        "Creator",
        "creator@example.com",
        UserRole::Employee,
    );
    let as_assignee = crate::task::domain::User::new(
        assignee,
        "Assignee",
        "assignee@example.com",
        UserRole::Employee,
    );

    assert!(task.permits_status_change(&as_creator, &[]));
    assert!(task.permits_status_change(&as_assignee, &[]));
}

#[rstest]
fn collaborators_may_change_status_but_not_edit() {
    let task = make_task(TaskStatus::Pending, Vec::new());
    let collaborator = user_with_role(UserRole::Employee);

    assert!(task.permits_status_change(&collaborator, &[collaborator.id()]));
    assert!(!task.permits_edit(&collaborator));
}

#[rstest]
fn unrelated_employees_may_neither_change_status_nor_edit() {
    let task = make_owned_task(
        TaskStatus::Pending,
        Vec::new(),
        Some(UserId::new()),
        Some(UserId::new()),
    );
    let outsider = user_with_role(UserRole::Employee);

    assert!(!task.permits_status_change(&outsider, &[]));
    assert!(!task.permits_edit(&outsider));
}
