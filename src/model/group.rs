use serde::{Deserialize, Serialize};

/// Bucket name for tasks whose group is absent or not registered
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Color used for unknown groups and the Uncategorized bucket
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Preset palette cycled through when a group is created without a color
pub const DEFAULT_COLORS: [&str; 8] = [
    "#8b5cf6", // purple
    "#3b82f6", // blue
    "#10b981", // green
    "#f59e0b", // amber
    "#ef4444", // red
    "#ec4899", // pink
    "#06b6d4", // cyan
    "#84cc16", // lime
];

/// A named, ordered, colored task category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub color: String,
}

impl TaskGroup {
    pub fn new(name: impl Into<String>) -> Self {
        TaskGroup {
            name: name.into(),
            order: 0,
            color: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_defaults_for_sparse_entries() {
        let group: TaskGroup = serde_json::from_str(r#"{"name": "Backend"}"#).unwrap();
        assert_eq!(group.name, "Backend");
        assert_eq!(group.order, 0);
        assert_eq!(group.color, "");
    }

    #[test]
    fn palette_colors_are_distinct() {
        for (i, a) in DEFAULT_COLORS.iter().enumerate() {
            for b in &DEFAULT_COLORS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
