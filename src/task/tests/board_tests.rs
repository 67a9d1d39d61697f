//! Board reconciler tests: optimistic moves, rollback, and refresh.

use super::support::{admin_session, completion_flags, employee_session, make_task, subtask_list};
use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{StatusNotice, TaskId, TaskStatus},
    ports::{TaskChange, TaskPatch, TaskRecord, TaskStore, TaskStoreError, TaskStoreResult},
    services::{BoardReconciler, MoveOutcome, TaskServiceError},
};
use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;
use rstest::{fixture, rstest};
use std::sync::Arc;

mock! {
    Store {}

    #[async_trait]
    impl TaskStore for Store {
        async fn fetch(&self, id: TaskId) -> TaskStoreResult<Option<TaskRecord>>;
        async fn apply(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()>;
        async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;
    }
}

type Board = BoardReconciler<InMemoryTaskStore, InMemoryTaskStore, DefaultClock>;

struct Harness {
    store: Arc<InMemoryTaskStore>,
    board: Board,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryTaskStore::new());
    let board = BoardReconciler::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::new(DefaultClock),
    );
    Harness { store, board }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_a_task_on_its_own_column_is_a_no_op(mut harness: Harness) {
    let task = make_task(TaskStatus::Pending, Vec::new());
    harness.store.insert_task(task.clone()).expect("seed task");
    harness.board.insert(task.clone());

    let outcome = harness
        .board
        .move_task(&admin_session(), task.id(), TaskStatus::Pending)
        .await
        .expect("no-op move should succeed");

    assert_eq!(outcome, MoveOutcome::NoOp);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_move_updates_local_view_and_store(mut harness: Harness) {
    let task = make_task(TaskStatus::Pending, Vec::new());
    harness.store.insert_task(task.clone()).expect("seed task");
    harness.board.insert(task.clone());

    let outcome = harness
        .board
        .move_task(&admin_session(), task.id(), TaskStatus::InProgress)
        .await
        .expect("move should succeed");

    assert_eq!(outcome, MoveOutcome::Moved { notice: None });
    let local = harness.board.task(task.id()).expect("task on board");
    assert_eq!(local.status(), TaskStatus::InProgress);
    assert_eq!(harness.board.column(TaskStatus::Pending).len(), 0);
    assert_eq!(harness.board.column(TaskStatus::InProgress).len(), 1);

    let stored = harness
        .store
        .fetch(task.id())
        .await
        .expect("fetch should succeed")
        .expect("task should exist")
        .task;
    assert_eq!(stored.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_persistence_rolls_the_column_back(mut harness: Harness) {
    let task = make_task(TaskStatus::Pending, Vec::new());
    harness.store.insert_task(task.clone()).expect("seed task");
    harness.board.insert(task.clone());
    harness.store.set_fail_writes(true).expect("arm write failure");

    let result = harness
        .board
        .move_task(&admin_session(), task.id(), TaskStatus::InProgress)
        .await;

    assert!(matches!(result, Err(TaskServiceError::Store(_))));
    // The optimistic value was discarded for the authoritative one.
    let local = harness.board.task(task.id()).expect("task on board");
    assert_eq!(local.status(), TaskStatus::Pending);
    assert_eq!(harness.board.column(TaskStatus::InProgress).len(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_to_completed_routes_through_the_transition_engine(mut harness: Harness) {
    let task = make_task(
        TaskStatus::InProgress,
        subtask_list(&[("a", true), ("b", false)]),
    );
    harness.store.insert_task(task.clone()).expect("seed task");
    harness.board.insert(task.clone());

    let outcome = harness
        .board
        .move_task(&admin_session(), task.id(), TaskStatus::Completed)
        .await
        .expect("move should succeed");

    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            notice: Some(StatusNotice::SubtasksForceCompleted)
        }
    );
    let local = harness.board.task(task.id()).expect("task on board");
    assert_eq!(completion_flags(local.subtasks()), vec![true, true]);

    let stored = harness
        .store
        .fetch(task.id())
        .await
        .expect("fetch should succeed")
        .expect("task should exist")
        .task;
    assert_eq!(completion_flags(stored.subtasks()), vec![true, true]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_drag_changes_nothing(mut harness: Harness) {
    let task = make_task(TaskStatus::Pending, Vec::new());
    harness.store.insert_task(task.clone()).expect("seed task");
    harness.board.insert(task.clone());

    let result = harness
        .board
        .move_task(&employee_session(), task.id(), TaskStatus::InProgress)
        .await;

    assert!(matches!(result, Err(TaskServiceError::Unauthorized { .. })));
    let local = harness.board.task(task.id()).expect("task on board");
    assert_eq!(local.status(), TaskStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_an_unknown_task_reports_not_found(mut harness: Harness) {
    let missing = TaskId::new();

    let result = harness
        .board
        .move_task(&admin_session(), missing, TaskStatus::Completed)
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Store(TaskStoreError::NotFound(id))) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_events_refresh_or_evict_local_tasks(mut harness: Harness) {
    let task = make_task(TaskStatus::Pending, Vec::new());
    harness.store.insert_task(task.clone()).expect("seed task");
    harness.board.insert(task.clone());

    // Another actor completes the task behind the board's back.
    harness
        .store
        .apply(task.id(), TaskPatch::Status(TaskStatus::Completed))
        .await
        .expect("remote update");
    harness
        .board
        .handle_change(TaskChange::Updated(task.id()))
        .await;
    let local = harness.board.task(task.id()).expect("task on board");
    assert_eq!(local.status(), TaskStatus::Completed);

    harness
        .board
        .handle_change(TaskChange::Deleted(task.id()))
        .await;
    assert!(harness.board.task(task.id()).is_none());
    assert!(harness.board.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn refresh_failure_is_logged_and_leaves_the_view_alone() {
    let task = make_task(TaskStatus::Pending, Vec::new());
    let id = task.id();

    let mut store = MockStore::new();
    store
        .expect_fetch()
        .returning(|_| Err(TaskStoreError::persistence(std::io::Error::other("down"))));

    let mut board = BoardReconciler::new(
        Arc::new(store),
        Arc::new(InMemoryTaskStore::new()),
        Arc::new(DefaultClock),
    );
    board.insert(task);

    board.refresh(id).await;

    // Best-effort refresh: the failure is logged, the stale value stays.
    assert!(board.task(id).is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn task_is_evicted_when_rollback_refetch_also_fails() {
    let task = make_task(TaskStatus::Pending, Vec::new());
    let id = task.id();

    let mut store = MockStore::new();
    store
        .expect_apply()
        .returning(|task_id, _| Err(TaskStoreError::NotFound(task_id)));
    store
        .expect_fetch()
        .returning(|_| Err(TaskStoreError::persistence(std::io::Error::other("down"))));

    let mut board = BoardReconciler::new(
        Arc::new(store),
        Arc::new(InMemoryTaskStore::new()),
        Arc::new(DefaultClock),
    );
    board.insert(task);

    let result = board
        .move_task(&admin_session(), id, TaskStatus::InProgress)
        .await;

    assert!(matches!(result, Err(TaskServiceError::Store(_))));
    // Rather than show an unconfirmed status, the task leaves the board.
    assert!(board.task(id).is_none());
}
