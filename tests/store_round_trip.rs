//! Cross-store persistence properties exercised through the public API.

use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

use taskdeck::io::group_store::GroupStore;
use taskdeck::io::paths::Paths;
use taskdeck::io::task_store::TaskStore;
use taskdeck::model::group::TaskGroup;
use taskdeck::model::task::{Task, TaskStatus};
use taskdeck::ops::task_ops;

fn test_paths(tmp: &TempDir) -> Paths {
    Paths {
        tasks_root: tmp.path().join("tasks"),
        backup_root: tmp.path().join("backups"),
    }
}

#[test]
fn full_project_round_trip() {
    let tmp = TempDir::new().unwrap();
    let paths = test_paths(&tmp);

    // Build a project through the ops layer, the way the TUI would
    let mut tasks = TaskStore::load(&paths, "web").unwrap();
    let mut groups = GroupStore::load(&paths, "web").unwrap();

    let mut t1 = Task::new("Design schema");
    t1.set_group("Backend");
    t1.description = "tables and indexes".into();
    task_ops::create_task(&mut tasks, &mut groups, t1).unwrap();

    let mut t2 = Task::new("Build API");
    t2.set_group("Backend");
    t2.blocked_by = vec!["1".into()];
    t2.owner = "sam".into();
    task_ops::create_task(&mut tasks, &mut groups, t2).unwrap();

    let mut t3 = Task::new("Landing page");
    t3.status = TaskStatus::InProgress;
    t3.active_form = Some("Building landing page".into());
    task_ops::create_task(&mut tasks, &mut groups, t3).unwrap();

    // Creating grouped tasks registered the group exactly once
    assert_eq!(groups.group_names(), vec!["Backend".to_string()]);

    // A fresh load reproduces the same task set, sorted by numeric ID
    let reloaded = TaskStore::load(&paths, "web").unwrap();
    let ids: Vec<&str> = reloaded.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert_eq!(reloaded.tasks[1].blocked_by, vec!["1".to_string()]);
    assert_eq!(reloaded.tasks[1].owner, "sam");
    assert_eq!(
        reloaded.tasks[2].active_form.as_deref(),
        Some("Building landing page")
    );
    assert_eq!(reloaded.tasks[0].group(), Some("Backend"));

    let reloaded_groups = GroupStore::load(&paths, "web").unwrap();
    assert_eq!(reloaded_groups.group_names(), vec!["Backend".to_string()]);
}

#[test]
fn delete_cascade_survives_reload() {
    let tmp = TempDir::new().unwrap();
    let paths = test_paths(&tmp);

    let mut store = TaskStore::load(&paths, "p").unwrap();
    let mut a = Task::new("a");
    a.blocks = vec!["2".into()];
    store.add_task(a);
    let mut b = Task::new("b");
    b.blocked_by = vec!["1".into()];
    store.add_task(b);
    store.save().unwrap();

    store.delete_task("1").unwrap();
    store.save().unwrap();

    let reloaded = TaskStore::load(&paths, "p").unwrap();
    assert_eq!(reloaded.tasks.len(), 1);
    assert_eq!(reloaded.tasks[0].id, "2");
    assert!(reloaded.tasks[0].blocked_by.is_empty());
}

#[test]
fn unknown_metadata_keys_survive_round_trip() {
    let tmp = TempDir::new().unwrap();
    let paths = test_paths(&tmp);
    let dir = paths.project_dir("p");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("1.json"),
        r#"{
  "id": "1",
  "subject": "imported",
  "status": "pending",
  "blocks": [],
  "blockedBy": [],
  "metadata": {
    "group": "Ops",
    "sourceUrl": "https://example.com/ticket/9",
    "weight": 3
  }
}"#,
    )
    .unwrap();

    let store = TaskStore::load(&paths, "p").unwrap();
    store.save().unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("1.json")).unwrap()).unwrap();
    assert_eq!(raw["metadata"]["sourceUrl"], "https://example.com/ticket/9");
    assert_eq!(raw["metadata"]["weight"], 3);
    assert_eq!(raw["metadata"]["group"], "Ops");
}

#[test]
fn staleness_detected_then_cleared_by_reload() {
    let tmp = TempDir::new().unwrap();
    let paths = test_paths(&tmp);

    let mut store = TaskStore::load(&paths, "p").unwrap();
    store.add_task(Task::new("mine"));
    store.save().unwrap();

    let snapshot = TaskStore::load(&paths, "p").unwrap();
    assert!(!snapshot.needs_reload());

    // Another process writes a task file
    std::thread::sleep(std::time::Duration::from_millis(20));
    fs::write(
        paths.project_dir("p").join("7.json"),
        r#"{"id": "7", "subject": "theirs"}"#,
    )
    .unwrap();
    assert!(snapshot.needs_reload());

    let fresh = TaskStore::load(&paths, "p").unwrap();
    assert!(!fresh.needs_reload());
    let subjects: Vec<&str> = fresh.tasks.iter().map(|t| t.subject.as_str()).collect();
    assert_eq!(subjects, ["mine", "theirs"]);
}

#[test]
fn backup_mirrors_saved_tasks() {
    let tmp = TempDir::new().unwrap();
    let paths = test_paths(&tmp);

    let mut store = TaskStore::load(&paths, "p").unwrap();
    store.add_task(Task::new("keep me safe"));
    store.save().unwrap();

    let primary = fs::read(paths.project_dir("p").join("1.json")).unwrap();
    let mirror = fs::read(paths.backup_project_dir("p").join("1.json")).unwrap();
    assert_eq!(primary, mirror);

    // Deleting the task leaves the mirror in place (backups are not pruned)
    store.delete_task("1").unwrap();
    store.save().unwrap();
    assert!(!paths.project_dir("p").join("1.json").exists());
    assert!(paths.backup_project_dir("p").join("1.json").exists());
}

#[test]
fn groups_file_invisible_to_task_scan() {
    let tmp = TempDir::new().unwrap();
    let paths = test_paths(&tmp);

    let mut groups = GroupStore::load(&paths, "p").unwrap();
    groups.add_group(TaskGroup::new("Solo"));
    groups.save().unwrap();

    let tasks = TaskStore::load(&paths, "p").unwrap();
    assert!(tasks.tasks.is_empty());
}

#[test]
fn group_reorder_round_trip() {
    let tmp = TempDir::new().unwrap();
    let paths = test_paths(&tmp);

    let mut store = GroupStore::load(&paths, "p").unwrap();
    for name in ["first", "second", "third"] {
        store.add_group(TaskGroup::new(name));
    }
    assert!(store.move_group_down("first"));
    store.save().unwrap();

    let reloaded = GroupStore::load(&paths, "p").unwrap();
    assert_eq!(
        reloaded.group_names(),
        vec!["second".to_string(), "first".to_string(), "third".to_string()]
    );
}
