use serde::Serialize;

use crate::model::task::{Task, TaskStatus};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub subject: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocked_by: Vec<String>,
}

impl From<&Task> for TaskJson {
    fn from(task: &Task) -> Self {
        TaskJson {
            id: task.id.clone(),
            subject: task.subject.clone(),
            status: task.status,
            description: task.description.clone(),
            group: task.group().map(str::to_string),
            owner: task.owner.clone(),
            blocks: task.blocks.clone(),
            blocked_by: task.blocked_by.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct ProjectJson {
    pub name: String,
    pub task_count: usize,
}

#[derive(Serialize)]
pub struct GroupJson {
    pub name: String,
    pub order: i64,
    pub color: String,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: String,
}

/// Serialize any JSON-output struct to stdout, pretty-printed.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Plain output helpers
// ---------------------------------------------------------------------------

/// One-line human-readable task summary: `○ #3 subject [group]`
pub fn task_line(task: &Task) -> String {
    let mut line = format!("{} #{} {}", task.status.icon(), task.id, task.subject);
    if let Some(group) = task.group() {
        line.push_str(&format!(" [{group}]"));
    }
    line
}
