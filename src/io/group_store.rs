use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::io::paths::Paths;
use crate::io::{StoreError, atomic_write};
use crate::model::group::{DEFAULT_COLORS, NEUTRAL_COLOR, TaskGroup};

/// JSON document shape of `_groups.json`
#[derive(Debug, Serialize, Deserialize)]
struct GroupsFile {
    #[serde(default)]
    groups: Vec<TaskGroup>,
}

/// In-memory snapshot of one project's group definitions, backed by the
/// single `_groups.json` document. Low-volume metadata: whole-file
/// overwrite on save, no backup mirror.
#[derive(Debug)]
pub struct GroupStore {
    pub project: String,
    pub groups: Vec<TaskGroup>,
    file_path: PathBuf,
    last_mod: Option<SystemTime>,
}

impl GroupStore {
    /// Load a project's groups, sorted by `order`. A missing file yields an
    /// empty store.
    pub fn load(paths: &Paths, project: &str) -> Result<GroupStore, StoreError> {
        let file_path = paths.groups_file(project);

        let data = match fs::read_to_string(&file_path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(GroupStore {
                    project: project.to_string(),
                    groups: Vec::new(),
                    file_path,
                    last_mod: None,
                });
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: file_path,
                    source: e,
                });
            }
        };

        let last_mod = fs::metadata(&file_path)
            .ok()
            .and_then(|m| m.modified().ok());

        let parsed: GroupsFile =
            serde_json::from_str(&data).map_err(|e| StoreError::Parse {
                path: file_path.clone(),
                source: e,
            })?;

        let mut groups = parsed.groups;
        groups.sort_by_key(|g| g.order);

        Ok(GroupStore {
            project: project.to_string(),
            groups,
            file_path,
            last_mod,
        })
    }

    /// Serialize the whole collection back to `_groups.json`.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.file_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let doc = GroupsFile {
            groups: self.groups.clone(),
        };
        let mut data = serde_json::to_vec_pretty(&doc)?;
        data.push(b'\n');
        atomic_write(&self.file_path, &data)?;
        Ok(())
    }

    /// True when `_groups.json` has been modified since this snapshot was
    /// loaded. False when the file cannot be stat'ed.
    pub fn needs_reload(&self) -> bool {
        let Ok(meta) = fs::metadata(&self.file_path) else {
            return false;
        };
        let Ok(current) = meta.modified() else {
            return false;
        };
        match self.last_mod {
            None => true,
            Some(baseline) => current > baseline,
        }
    }

    pub fn get_group(&self, name: &str) -> Option<&TaskGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Add a group at the end of the display order. Without an explicit
    /// color, one is assigned from the preset palette by group count.
    pub fn add_group(&mut self, mut group: TaskGroup) {
        let max_order = self.groups.iter().map(|g| g.order).max().unwrap_or(0);
        group.order = max_order + 1;
        if group.color.is_empty() {
            group.color = DEFAULT_COLORS[self.groups.len() % DEFAULT_COLORS.len()].to_string();
        }
        self.groups.push(group);
    }

    /// Replace the group with the given name. Returns whether a match was
    /// found; an unknown name is a normal outcome, not an error.
    pub fn update_group(&mut self, name: &str, updated: TaskGroup) -> bool {
        match self.groups.iter_mut().find(|g| g.name == name) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Remove the group with the given name. Returns whether a match was found.
    pub fn delete_group(&mut self, name: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.name != name);
        self.groups.len() != before
    }

    /// Swap order values with the previous group (by sorted position) and
    /// re-sort. Returns false at the top boundary or for an unknown name.
    pub fn move_group_up(&mut self, name: &str) -> bool {
        let Some(idx) = self.groups.iter().position(|g| g.name == name) else {
            return false;
        };
        if idx == 0 {
            return false;
        }
        let prev = self.groups[idx - 1].order;
        self.groups[idx - 1].order = self.groups[idx].order;
        self.groups[idx].order = prev;
        self.groups.sort_by_key(|g| g.order);
        true
    }

    /// Swap order values with the next group (by sorted position) and
    /// re-sort. Returns false at the bottom boundary or for an unknown name.
    pub fn move_group_down(&mut self, name: &str) -> bool {
        let Some(idx) = self.groups.iter().position(|g| g.name == name) else {
            return false;
        };
        if idx + 1 >= self.groups.len() {
            return false;
        }
        let next = self.groups[idx + 1].order;
        self.groups[idx + 1].order = self.groups[idx].order;
        self.groups[idx].order = next;
        self.groups.sort_by_key(|g| g.order);
        true
    }

    /// Group names in display order
    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }

    /// The group's color, or the fixed neutral default for unknown names
    pub fn group_color(&self, name: &str) -> &str {
        self.get_group(name)
            .map(|g| g.color.as_str())
            .unwrap_or(NEUTRAL_COLOR)
    }

    /// Create the group if absent. No-op on an empty name or existing group.
    pub fn ensure_group_exists(&mut self, name: &str) {
        if name.is_empty() || self.get_group(name).is_some() {
            return;
        }
        self.add_group(TaskGroup::new(name));
    }
}
