use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// All statuses in cycle order
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// The wire name, as it appears in task files
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parse a wire name into a status
    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    /// The glyph used in list rows and badges
    pub fn icon(self) -> char {
        match self {
            TaskStatus::Pending => '○',
            TaskStatus::InProgress => '●',
            TaskStatus::Completed => '✓',
        }
    }

    /// Next status in the pending → in_progress → completed → pending cycle
    pub fn cycled(self) -> TaskStatus {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

/// A single task, backed by one `<id>.json` file in the project directory.
///
/// `metadata` is an open bag so that keys written by other tools survive a
/// round trip untouched; the one key this program interprets is `group`,
/// exposed through [`Task::group`] and [`Task::set_group`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Spinner label shown by the producing tool while the task is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_form: Option<String>,
    /// IDs of tasks that wait on this one
    #[serde(default)]
    pub blocks: Vec<String>,
    /// IDs of tasks this one waits on
    #[serde(default)]
    pub blocked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, Value>,
}

/// The recognized metadata key holding a task's group name
pub const GROUP_KEY: &str = "group";

impl Task {
    /// Create a task with the given subject and all other fields defaulted
    pub fn new(subject: impl Into<String>) -> Self {
        Task {
            subject: subject.into(),
            ..Task::default()
        }
    }

    /// The task's group name from metadata. Absent or empty means ungrouped.
    pub fn group(&self) -> Option<&str> {
        self.metadata
            .get(GROUP_KEY)
            .and_then(Value::as_str)
            .filter(|g| !g.is_empty())
    }

    /// Set or clear the group name. An empty name removes the key entirely
    /// rather than storing an empty string.
    pub fn set_group(&mut self, group: &str) {
        if group.is_empty() {
            self.metadata.shift_remove(GROUP_KEY);
        } else {
            self.metadata
                .insert(GROUP_KEY.to_string(), Value::String(group.to_string()));
        }
    }

    /// Case-insensitive substring match over subject and description.
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.subject.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
