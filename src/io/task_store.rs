use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::io::paths::{Paths, is_task_file_name};
use crate::io::{StoreError, atomic_write};
use crate::model::task::Task;

/// A project with its task-file count, for the project picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub task_count: usize,
}

/// In-memory snapshot of one project's tasks, loaded from a directory of
/// `<id>.json` files. Mutations touch the snapshot only; `save` persists.
#[derive(Debug)]
pub struct TaskStore {
    pub project: String,
    pub tasks: Vec<Task>,
    project_dir: PathBuf,
    backup_dir: PathBuf,
    /// Directory mtime captured at load; the staleness baseline
    last_mod: Option<SystemTime>,
}

impl TaskStore {
    /// Load a project's tasks. Skips directories, underscore-prefixed names,
    /// non-JSON files, and files that fail to parse, so a single corrupt task
    /// never blocks the project. A missing directory yields an empty store.
    pub fn load(paths: &Paths, project: &str) -> Result<TaskStore, StoreError> {
        let project_dir = paths.project_dir(project);
        let backup_dir = paths.backup_project_dir(project);

        let entries = match fs::read_dir(&project_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(TaskStore {
                    project: project.to_string(),
                    tasks: Vec::new(),
                    project_dir,
                    backup_dir,
                    last_mod: None,
                });
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: project_dir,
                    source: e,
                });
            }
        };

        let last_mod = fs::metadata(&project_dir)
            .ok()
            .and_then(|m| m.modified().ok());

        let mut tasks = Vec::new();
        let mut file_names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !is_task_file_name(name) {
                continue;
            }
            file_names.push(name.to_string());
            let Ok(data) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(task) = serde_json::from_str::<Task>(&data) else {
                continue;
            };
            tasks.push(task);
        }

        tasks.sort_by_key(|t| numeric_id(&t.id));

        let store = TaskStore {
            project: project.to_string(),
            tasks,
            project_dir,
            backup_dir,
            last_mod,
        };

        // Refresh the backup mirror for anything newer than its copy
        for name in &file_names {
            store.backup_if_newer(name);
        }

        Ok(store)
    }

    /// Write every task back to `<id>.json`, creating the project directory
    /// if missing. Each file is written atomically and mirrored to the
    /// backup directory; mirror failures are swallowed.
    pub fn save(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.project_dir)?;
        for task in &self.tasks {
            self.save_task(task)?;
        }
        Ok(())
    }

    fn save_task(&self, task: &Task) -> Result<(), StoreError> {
        let name = format!("{}.json", task.id);
        let mut data = serde_json::to_vec_pretty(task)?;
        data.push(b'\n');
        atomic_write(&self.project_dir.join(&name), &data)?;
        self.backup_bytes(&name, &data);
        Ok(())
    }

    /// Mirror `data` into the backup directory unless the copy there is
    /// already byte-identical. Best effort: all failures are ignored.
    fn backup_bytes(&self, name: &str, data: &[u8]) {
        if fs::create_dir_all(&self.backup_dir).is_err() {
            return;
        }
        let backup_path = self.backup_dir.join(name);
        if let Ok(existing) = fs::read(&backup_path)
            && existing == data
        {
            return;
        }
        let _ = fs::write(&backup_path, data);
    }

    /// Copy a task file to the backup directory if the source is newer than
    /// the existing copy. Best effort.
    fn backup_if_newer(&self, name: &str) {
        let src = self.project_dir.join(name);
        let dst = self.backup_dir.join(name);

        let Ok(src_meta) = fs::metadata(&src) else {
            return;
        };
        if let (Ok(dst_meta), Ok(src_mod)) = (fs::metadata(&dst), src_meta.modified())
            && dst_meta.modified().is_ok_and(|dst_mod| src_mod <= dst_mod)
        {
            return;
        }
        if fs::create_dir_all(&self.backup_dir).is_err() {
            return;
        }
        let _ = fs::copy(&src, &dst);
    }

    /// True when the project directory has been modified since this
    /// snapshot was loaded. False when the directory cannot be stat'ed.
    pub fn needs_reload(&self) -> bool {
        let Ok(meta) = fs::metadata(&self.project_dir) else {
            return false;
        };
        let Ok(current) = meta.modified() else {
            return false;
        };
        match self.last_mod {
            // Loaded when the directory didn't exist; it does now
            None => true,
            Some(baseline) => current > baseline,
        }
    }

    /// Add a task, assigning the next numeric ID. Returns the assigned ID;
    /// the caller must still `save` to persist.
    pub fn add_task(&mut self, mut task: Task) -> String {
        task.id = self.next_id();
        let id = task.id.clone();
        self.tasks.push(task);
        id
    }

    /// Replace the task with the same ID wholesale.
    pub fn update_task(&mut self, task: Task) -> Result<(), StoreError> {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                Ok(())
            }
            None => Err(StoreError::NotFound(task.id)),
        }
    }

    /// Delete a task: strip its ID from every other task's link lists,
    /// drop it from the snapshot, and remove its backing file. A backing
    /// file already gone is not an error. Link cleanup is in-memory only;
    /// the caller must `save` to persist it.
    pub fn delete_task(&mut self, id: &str) -> Result<(), StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        for task in &mut self.tasks {
            task.blocks.retain(|b| b != id);
            task.blocked_by.retain(|b| b != id);
        }
        self.tasks.remove(idx);

        match fs::remove_file(self.project_dir.join(format!("{id}.json"))) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Tasks with the given status. `""` and `"all"` return everything.
    pub fn tasks_by_status(&self, filter: &str) -> Vec<&Task> {
        if filter.is_empty() || filter == "all" {
            return self.tasks.iter().collect();
        }
        self.tasks
            .iter()
            .filter(|t| t.status.as_str() == filter)
            .collect()
    }

    /// Tasks whose resolved group matches. `""` and `"all"` return everything.
    pub fn tasks_by_group(&self, filter: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| {
                filter.is_empty() || filter == "all" || t.group() == Some(filter)
            })
            .collect()
    }

    /// Case-insensitive substring search over subject and description.
    /// An empty query returns everything.
    pub fn search(&self, query: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.matches_query(query))
            .collect()
    }

    /// Distinct group names referenced by tasks, sorted ascending.
    pub fn all_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self
            .tasks
            .iter()
            .filter_map(|t| t.group())
            .map(str::to_string)
            .collect();
        groups.sort();
        groups.dedup();
        groups
    }

    fn next_id(&self) -> String {
        let max = self
            .tasks
            .iter()
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

/// Numeric interpretation of a task ID for sorting; unparsable IDs sort as 0.
fn numeric_id(id: &str) -> u64 {
    id.parse().unwrap_or(0)
}

/// List projects under the tasks root: directories containing at least one
/// task-named file, with counts, sorted by name. A missing root is empty.
pub fn list_projects(paths: &Paths) -> Result<Vec<ProjectInfo>, StoreError> {
    let entries = match fs::read_dir(&paths.tasks_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StoreError::Read {
                path: paths.tasks_root.clone(),
                source: e,
            });
        }
    };

    let mut projects = Vec::new();
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let task_count = count_task_files(&entry.path());
        if task_count == 0 {
            continue;
        }
        projects.push(ProjectInfo { name, task_count });
    }

    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

fn count_task_files(dir: &std::path::Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|e| !e.path().is_dir())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(is_task_file_name)
        })
        .count()
}
