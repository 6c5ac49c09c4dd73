//! Behaviour every [`TaskStore`] implementation must share.

use std::thread::sleep;
use std::time::Duration;

use pretty_assertions::assert_eq;

use super::{StoreError, StoreResult, TaskStore};

pub(crate) fn run_all<S: TaskStore>(make: impl Fn() -> StoreResult<S>) {
    create_round_trips(make().unwrap());
    notes_round_trip_and_restamp(make().unwrap());
    categories_default_and_order(make().unwrap());
    closing_and_reopening_category(make().unwrap());
    mutations_on_missing_task_fail(make().unwrap());
    toggle_and_delete(make().unwrap());
}

fn create_round_trips<S: TaskStore>(mut store: S) {
    store.create_task("buy milk", "Home").unwrap();

    let tasks = store.list_tasks("Home").unwrap();
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.text, "buy milk");
    assert_eq!(task.category, "Home");
    assert!(!task.done);
    assert!(task.created_at.is_some());
    assert_eq!(task.notes, "");
    assert_eq!(task.note_updated_at, None);
}

fn notes_round_trip_and_restamp<S: TaskStore>(mut store: S) {
    store.create_task("write report", "Work").unwrap();
    let id = store.list_tasks("Work").unwrap()[0].id;

    store.set_notes(id, "hello\nworld").unwrap();
    let first = store.list_tasks("Work").unwrap().remove(0);
    assert_eq!(first.notes, "hello\nworld");
    let first_stamp = first.note_updated_at.expect("notes timestamp set");

    sleep(Duration::from_millis(2));
    store.set_notes(id, "").unwrap();
    let second = store.list_tasks("Work").unwrap().remove(0);
    assert_eq!(second.notes, "");
    assert!(second.note_updated_at.expect("notes timestamp kept") > first_stamp);
}

fn categories_default_and_order<S: TaskStore>(mut store: S) {
    assert_eq!(store.list_categories().unwrap(), vec!["General".to_string()]);

    store.create_task("a", "Work").unwrap();
    store.create_task("b", "Home").unwrap();
    store.create_task("c", "Work").unwrap();
    assert_eq!(
        store.list_categories().unwrap(),
        vec!["Work".to_string(), "Home".to_string()]
    );

    let texts: Vec<_> = store
        .list_tasks("Work")
        .unwrap()
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(texts, vec!["a".to_string(), "c".to_string()]);
}

fn closing_and_reopening_category<S: TaskStore>(mut store: S) {
    store.create_task("ship it", "Work").unwrap();
    store.create_task("relax", "Home").unwrap();

    store.tombstone_category("Work").unwrap();
    store.tombstone_category("Work").unwrap();
    store.delete_all_tasks("Work").unwrap();
    assert_eq!(store.tombstones().unwrap(), vec!["Work".to_string()]);
    assert_eq!(store.list_categories().unwrap(), vec!["Home".to_string()]);

    store.clear_tombstone("Work").unwrap();
    assert!(store.tombstones().unwrap().is_empty());
    assert!(store.list_tasks("Work").unwrap().is_empty());
    assert_eq!(store.list_tasks("Home").unwrap().len(), 1);
}

fn mutations_on_missing_task_fail<S: TaskStore>(mut store: S) {
    assert!(matches!(store.set_done(42, true), Err(StoreError::NotFound(42))));
    assert!(matches!(store.set_notes(42, "x"), Err(StoreError::NotFound(42))));
    assert!(matches!(store.delete_task(42), Err(StoreError::NotFound(42))));
}

fn toggle_and_delete<S: TaskStore>(mut store: S) {
    store.create_task("one", "General").unwrap();
    store.create_task("two", "General").unwrap();
    let ids: Vec<_> = store
        .list_tasks("General")
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();

    store.set_done(ids[1], true).unwrap();
    let tasks = store.list_tasks("General").unwrap();
    assert!(!tasks[0].done);
    assert!(tasks[1].done);

    store.delete_task(ids[0]).unwrap();
    let tasks = store.list_tasks("General").unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "two");
}
