use rusqlite::Connection;
use tempfile::TempDir;
use todolite::error::TodoError;
use todolite::models::NewTask;
use todolite::storage::{ColumnMigration, TaskStore};

fn open_store() -> (TempDir, TaskStore) {
    let dir = TempDir::new().unwrap();
    let store = TaskStore::open(dir.path().join("tasks.db")).unwrap();
    (dir, store)
}

fn is_timestamp(s: &str) -> bool {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").is_ok() && s.len() == 16
}

#[test]
fn test_add_and_list_active() {
    let (_dir, store) = open_store();
    let id = store.add("Write report", 5, "2025-01-01 09:00", "2025-01-02 17:00").unwrap();

    let active = store.list_active().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, id);
    assert_eq!(active[0].title, "Write report");
    assert_eq!(active[0].priority, 5);
    assert_eq!(active[0].soft_deadline, "2025-01-01 09:00");
    assert_eq!(active[0].hard_deadline, "2025-01-02 17:00");
    assert!(!active[0].completed);
    assert_eq!(active[0].completion_time, None);
}

#[test]
fn test_active_sorted_by_priority_desc() {
    let (_dir, store) = open_store();
    let low = store.add("low", 3, "s", "h").unwrap();
    let high = store.add("high", 8, "s", "h").unwrap();
    let tie = store.add("tie", 3, "s", "h").unwrap();

    let ids: Vec<i64> = store.list_active().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![high, low, tie]);
}

#[test]
fn test_out_of_range_priority_rejected() {
    let (_dir, store) = open_store();
    for p in [-1, 11, 100, i64::MIN] {
        let err = store.add("bad", p, "s", "h").unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
    }
    assert!(store.list_all().unwrap().is_empty());

    let id = store.add("ok", 4, "s", "h").unwrap();
    for p in [-1, 11] {
        assert!(store.update_priority(id, p).is_err());
    }
    assert_eq!(store.get(id).unwrap().unwrap().priority, 4);
}

#[test]
fn test_boundary_priorities_accepted() {
    let (_dir, store) = open_store();
    let id = store.add("zero", 0, "s", "h").unwrap();
    store.add("ten", 10, "s", "h").unwrap();
    assert!(store.update_priority(id, 10).unwrap());
    assert_eq!(store.get(id).unwrap().unwrap().priority, 10);
}

#[test]
fn test_empty_title_rejected() {
    let (_dir, store) = open_store();
    assert!(matches!(store.add("", 1, "s", "h"), Err(TodoError::Validation(_))));
    assert!(matches!(store.add("   ", 1, "s", "h"), Err(TodoError::Validation(_))));
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_complete_moves_task_to_completed() {
    let (_dir, store) = open_store();
    let id = store.add("finish me", 2, "s", "h").unwrap();

    assert!(store.complete(id).unwrap());
    assert!(store.list_active().unwrap().is_empty());

    let done = store.list_completed().unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, id);
    assert!(done[0].completed);
    assert!(is_timestamp(done[0].completion_time.as_deref().unwrap()));
}

#[test]
fn test_complete_twice_keeps_completion_time() {
    let (dir, store) = open_store();
    let id = store.add("once", 2, "s", "h").unwrap();
    store.complete(id).unwrap();

    // Pin a distinct time so an overwrite would be visible.
    let conn = Connection::open(dir.path().join("tasks.db")).unwrap();
    conn.execute(
        "UPDATE tasks SET completion_time = '2000-01-01 00:00' WHERE id = ?1",
        [id],
    )
    .unwrap();

    assert!(!store.complete(id).unwrap());
    let task = store.get(id).unwrap().unwrap();
    assert_eq!(task.completion_time.as_deref(), Some("2000-01-01 00:00"));
}

#[test]
fn test_completed_sorted_by_hard_deadline_desc() {
    let (_dir, store) = open_store();
    let early = store.add("early", 9, "s", "2025-01-01 09:00").unwrap();
    let late = store.add("late", 1, "s", "2025-03-01 09:00").unwrap();
    let mid = store.add("mid", 5, "s", "2025-02-01 09:00").unwrap();
    store.add("still active", 5, "s", "2030-01-01 00:00").unwrap();
    for id in [early, late, mid] {
        store.complete(id).unwrap();
    }

    let ids: Vec<i64> = store.list_completed().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![late, mid, early]);
}

#[test]
fn test_list_all_includes_both_states() {
    let (_dir, store) = open_store();
    let a = store.add("a", 1, "s", "h").unwrap();
    let b = store.add("b", 7, "s", "h").unwrap();
    store.complete(a).unwrap();

    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![b, a]);
}

#[test]
fn test_missing_id_is_noop() {
    let (_dir, store) = open_store();
    store.add("keep", 1, "s", "h").unwrap();

    assert!(!store.delete(999).unwrap());
    assert!(!store.complete(999).unwrap());
    assert!(!store.update_priority(999, 5).unwrap());
    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[test]
fn test_ids_not_reused_after_delete() {
    let (_dir, store) = open_store();
    let first = store.add("first", 1, "s", "h").unwrap();
    let second = store.add("second", 1, "s", "h").unwrap();
    assert!(store.delete(second).unwrap());

    let third = store.add("third", 1, "s", "h").unwrap();
    assert!(third > second);
    assert!(second > first);
}

#[test]
fn test_bulk_add_inserts_all() {
    let (_dir, store) = open_store();
    let report = store
        .bulk_add(&[
            NewTask::new("A", 1, "s", "h"),
            NewTask::new("B", 9, "s", "h"),
        ])
        .unwrap();
    assert_eq!(report.count, 2);
    assert_eq!(report.to_string(), "imported 2 tasks");
    assert_eq!(store.list_active().unwrap()[0].title, "B");
}

#[test]
fn test_bulk_add_rolls_back_on_invalid_record() {
    let (_dir, store) = open_store();
    let err = store
        .bulk_add(&[
            NewTask::new("A", 1, "s", "h"),
            NewTask::new("B", 2, "s", "h"),
            NewTask::new("C", 11, "s", "h"),
        ])
        .unwrap_err();
    match err {
        TodoError::Import(msg) => assert!(msg.contains("record 2"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_bulk_add_single_bad_record_leaves_store_empty() {
    let (_dir, store) = open_store();
    assert!(store.bulk_add(&[NewTask::new("A", 11, "s", "h")]).is_err());
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_initialize_is_idempotent() {
    let (_dir, store) = open_store();
    store.add("survives", 1, "s", "h").unwrap();
    assert_eq!(store.initialize().unwrap(), ColumnMigration::AlreadyPresent);
    assert_eq!(store.initialize().unwrap(), ColumnMigration::AlreadyPresent);
    assert_eq!(store.list_all().unwrap().len(), 1);
}

fn create_legacy_table(path: &std::path::Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            priority INTEGER CHECK(priority BETWEEN 0 AND 10),
            soft_deadline TEXT,
            hard_deadline TEXT,
            completed INTEGER DEFAULT 0
        );
        INSERT INTO tasks (title, priority, soft_deadline, hard_deadline, completed)
        VALUES ('old done', 3, 's', 'h', 1);",
    )
    .unwrap();
}

#[test]
fn test_legacy_store_gains_completion_time() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.db");
    create_legacy_table(&path);

    let store = TaskStore::new(&path);
    assert_eq!(store.initialize().unwrap(), ColumnMigration::Added);
    assert_eq!(store.initialize().unwrap(), ColumnMigration::AlreadyPresent);

    let done = store.list_completed().unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].completion_time, None);
    assert_eq!(done[0].history_line(), "[✓] old done  due:h  done:-");

    let id = store.add("new", 4, "s", "h").unwrap();
    assert!(store.complete(id).unwrap());
    assert!(store.get(id).unwrap().unwrap().completion_time.is_some());
}

#[test]
fn test_fresh_store_reports_column_present() {
    let dir = TempDir::new().unwrap();
    let store = TaskStore::new(dir.path().join("fresh.db"));
    assert_eq!(store.initialize().unwrap(), ColumnMigration::AlreadyPresent);
}

#[test]
fn test_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.db");
    let id = TaskStore::open(&path).unwrap().add("persist", 6, "s", "h").unwrap();

    let reopened = TaskStore::open(&path).unwrap();
    assert_eq!(reopened.get(id).unwrap().unwrap().title, "persist");
}
