use std::fs;
use todolist_core::{RepoError, Task, TodoStore};

#[test]
fn save_and_load_round_trip_preserves_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("todos.csv");

    let mut original = TodoStore::new();
    original.add("A").unwrap();
    let b = original.add("B; with separator").unwrap();
    original.add("C").unwrap();
    original.remove(1);
    original.mark_done(b);
    assert!(original.save(&file));
    assert!(file.exists());

    let mut restored = TodoStore::new();
    assert!(restored.load(&file));
    assert_eq!(restored.list(), original.list());
}

#[test]
fn save_writes_id_done_text_lines() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("todos.csv");

    let mut store = TodoStore::new();
    store.add("first").unwrap();
    let second = store.add("second").unwrap();
    store.mark_done(second);
    assert!(store.save(&file));

    let content = fs::read_to_string(&file).unwrap();
    assert_eq!(content, "1;false;first\n2;true;second\n");
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("todos.csv");
    fs::write(&file, "1;false;stale\n2;false;stale\n3;false;stale\n").unwrap();

    let mut store = TodoStore::new();
    store.add("fresh").unwrap();
    assert!(store.save(&file));

    assert_eq!(fs::read_to_string(&file).unwrap(), "1;false;fresh\n");
}

#[test]
fn save_to_missing_directory_fails_without_touching_store() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("missing").join("todos.csv");

    let mut store = TodoStore::new();
    store.add("still here").unwrap();
    assert!(!store.save(&file));
    assert!(matches!(store.try_save(&file), Err(RepoError::Io(_))));
    assert_eq!(store.list(), vec![Task::new(1, "still here")]);
}

#[test]
fn load_missing_file_keeps_prior_state() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does_not_exist.csv");

    let mut store = TodoStore::new();
    store.add("Bleib da").unwrap();
    assert!(!store.load(&missing));

    let tasks = store.list();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Bleib da");
    assert_eq!(store.next_id(), 2);
}

#[test]
fn load_with_bad_token_aborts_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.csv");
    fs::write(&file, "1;false;good\n2;maybe;bad\n").unwrap();

    let mut store = TodoStore::new();
    store.add("prior").unwrap();
    assert!(!store.load(&file));
    assert_eq!(store.list(), vec![Task::new(1, "prior")]);

    let err = store.try_load(&file).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData { line: 2, .. }));

    fs::write(&file, "abc;false;bad id\n").unwrap();
    assert!(!store.load(&file));
    assert_eq!(store.len(), 1);
}

#[test]
fn load_skips_lines_with_too_few_fields() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("mixed.csv");
    fs::write(&file, "1;false;a\nnot a task\n\n3;true\n4;TRUE;b;c\n").unwrap();

    let mut store = TodoStore::new();
    assert_eq!(store.try_load(&file).unwrap(), 2);
    assert_eq!(
        store.list(),
        vec![
            Task::with_state(1, "a", false),
            Task::with_state(4, "b;c", true)
        ]
    );
}

#[test]
fn load_empty_file_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("empty.csv");
    fs::File::create(&file).unwrap();

    let mut store = TodoStore::new();
    store.add("replaced").unwrap();
    assert!(store.load(&file));
    assert!(store.list().is_empty());
    assert_eq!(store.add("fresh").unwrap(), 1);
}

#[test]
fn save_and_load_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("empty.csv");

    assert!(TodoStore::new().save(&file));
    let mut store = TodoStore::new();
    assert!(store.load(&file));
    assert!(store.is_empty());
}

#[test]
fn next_id_continues_from_max_loaded_id() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("todos.csv");
    fs::write(&file, "7;false;seven\n3;true;three\n").unwrap();

    let mut store = TodoStore::new();
    assert!(store.load(&file));
    assert_eq!(store.add("next").unwrap(), 8);
}

#[test]
fn next_id_after_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("todos.csv");

    let mut first = TodoStore::new();
    first.add("A").unwrap();
    first.add("B").unwrap();
    assert!(first.save(&file));

    let mut second = TodoStore::new();
    assert!(second.load(&file));
    assert_eq!(second.add("C").unwrap(), 3);
}

#[test]
fn updated_text_with_line_break_is_cut_after_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("todos.csv");

    let mut store = TodoStore::new();
    let id = store.add("placeholder").unwrap();
    assert!(store.update_text(id, "line1\nline2"));
    assert!(store.save(&file));

    let mut restored = TodoStore::new();
    assert!(restored.load(&file));
    assert_eq!(restored.list(), vec![Task::new(id, "line1")]);
}
