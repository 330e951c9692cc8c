//! Integration tests for the `td` CLI.
//!
//! Each test points the binary at a temp tasks root via environment
//! variables, runs `td` as a subprocess, and verifies stdout and/or file
//! contents.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Get the path to the built `td` binary.
fn td_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("td");
    path
}

fn td(root: &Path, args: &[&str]) -> Output {
    Command::new(td_bin())
        .args(args)
        .env("TASKDECK_TASKS_DIR", root.join("tasks"))
        .env("TASKDECK_BACKUP_DIR", root.join("backups"))
        .env("XDG_CONFIG_HOME", root.join("config"))
        .output()
        .expect("failed to run td")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn add_then_list() {
    let tmp = TempDir::new().unwrap();
    let out = td(tmp.path(), &["add", "demo", "First task"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("added #1"));

    let out = td(tmp.path(), &["add", "demo", "Second task", "--group", "Core"]);
    assert!(stdout(&out).contains("added #2"));

    let out = td(tmp.path(), &["list", "demo"]);
    let text = stdout(&out);
    assert!(text.contains("#1 First task"));
    assert!(text.contains("#2 Second task [Core]"));
}

#[test]
fn add_rejects_empty_subject() {
    let tmp = TempDir::new().unwrap();
    let out = td(tmp.path(), &["add", "demo", "   "]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("subject"));
}

#[test]
fn show_json_has_full_task() {
    let tmp = TempDir::new().unwrap();
    td(
        tmp.path(),
        &[
            "add",
            "demo",
            "Inspect me",
            "--description",
            "the details",
            "--group",
            "Ops",
            "--owner",
            "kit",
        ],
    );

    let out = td(tmp.path(), &["show", "demo", "1", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let task: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(task["id"], "1");
    assert_eq!(task["subject"], "Inspect me");
    assert_eq!(task["description"], "the details");
    assert_eq!(task["group"], "Ops");
    assert_eq!(task["owner"], "kit");
    assert_eq!(task["status"], "pending");
}

#[test]
fn show_unknown_task_fails() {
    let tmp = TempDir::new().unwrap();
    td(tmp.path(), &["add", "demo", "x"]);
    let out = td(tmp.path(), &["show", "demo", "42"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("not found"));
}

#[test]
fn status_transition_and_filter() {
    let tmp = TempDir::new().unwrap();
    td(tmp.path(), &["add", "demo", "a"]);
    td(tmp.path(), &["add", "demo", "b"]);

    let out = td(tmp.path(), &["status", "demo", "2", "completed"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let out = td(tmp.path(), &["list", "demo", "--status", "completed"]);
    let text = stdout(&out);
    assert!(text.contains("#2 b"));
    assert!(!text.contains("#1 a"));

    let out = td(tmp.path(), &["status", "demo", "1", "nonsense"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("invalid status"));
}

#[test]
fn delete_cleans_dependency_links() {
    let tmp = TempDir::new().unwrap();
    td(tmp.path(), &["add", "demo", "blocker"]);
    td(tmp.path(), &["add", "demo", "dependent"]);

    // Wire the dependency by editing the file the way another tool would
    let task_file = tmp.path().join("tasks/demo/2.json");
    let mut task: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&task_file).unwrap()).unwrap();
    task["blockedBy"] = serde_json::json!(["1"]);
    std::fs::write(&task_file, serde_json::to_string_pretty(&task).unwrap()).unwrap();

    let out = td(tmp.path(), &["delete", "demo", "1"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(!tmp.path().join("tasks/demo/1.json").exists());

    let out = td(tmp.path(), &["show", "demo", "2", "--json"]);
    let task: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert!(
        task.get("blocked_by").is_none(),
        "dangling blockedBy survived: {task}"
    );
}

#[test]
fn search_is_case_insensitive() {
    let tmp = TempDir::new().unwrap();
    td(tmp.path(), &["add", "demo", "Fix OAuth flow"]);
    td(tmp.path(), &["add", "demo", "Write docs"]);

    let out = td(tmp.path(), &["search", "demo", "oauth"]);
    let text = stdout(&out);
    assert!(text.contains("#1"));
    assert!(!text.contains("#2"));
}

#[test]
fn projects_lists_only_dirs_with_tasks() {
    let tmp = TempDir::new().unwrap();
    td(tmp.path(), &["add", "beta", "x"]);
    td(tmp.path(), &["add", "alpha", "y"]);
    // A directory with only non-task files is not a project
    let stray = tmp.path().join("tasks/stray");
    std::fs::create_dir_all(&stray).unwrap();
    std::fs::write(stray.join("_groups.json"), r#"{"groups": []}"#).unwrap();

    let out = td(tmp.path(), &["projects", "--json"]);
    let projects: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let names: Vec<&str> = projects
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["alpha", "beta"]);
}

#[test]
fn groups_created_on_demand_with_palette_colors() {
    let tmp = TempDir::new().unwrap();
    td(tmp.path(), &["add", "demo", "a", "--group", "One"]);
    td(tmp.path(), &["add", "demo", "b", "--group", "Two"]);
    td(tmp.path(), &["add", "demo", "c", "--group", "One"]);

    let out = td(tmp.path(), &["groups", "demo", "--json"]);
    let groups: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let groups = groups.as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["name"], "One");
    assert_eq!(groups[0]["order"], 1);
    assert_eq!(groups[1]["name"], "Two");
    assert_eq!(groups[1]["order"], 2);
    // Colors came from the preset palette, in creation order
    assert_eq!(groups[0]["color"], "#8b5cf6");
    assert_eq!(groups[1]["color"], "#3b82f6");
}

#[test]
fn corrupt_task_file_is_skipped() {
    let tmp = TempDir::new().unwrap();
    td(tmp.path(), &["add", "demo", "good"]);
    std::fs::write(tmp.path().join("tasks/demo/2.json"), "{ broken").unwrap();

    let out = td(tmp.path(), &["list", "demo"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("#1 good"));
    assert!(!text.contains("#2"));
}

#[test]
fn backup_mirror_follows_saves() {
    let tmp = TempDir::new().unwrap();
    td(tmp.path(), &["add", "demo", "mirrored"]);

    let primary = tmp.path().join("tasks/demo/1.json");
    let mirror = tmp.path().join("backups/demo/1.json");
    assert!(mirror.exists());
    assert_eq!(
        std::fs::read(&primary).unwrap(),
        std::fs::read(&mirror).unwrap()
    );
}
