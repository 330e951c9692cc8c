use std::path::{Path, PathBuf};

use crate::io::config::Config;

/// Name of the per-project group definitions file. The underscore prefix
/// keeps it out of the task-file scan.
pub const GROUPS_FILE: &str = "_groups.json";

/// Resolved filesystem roots for task and backup storage.
///
/// Precedence for each root: command-line flag, then environment variable
/// (`TASKDECK_TASKS_DIR` / `TASKDECK_BACKUP_DIR`), then the config file,
/// then `~/.taskdeck/{tasks,backups}`.
#[derive(Debug, Clone)]
pub struct Paths {
    pub tasks_root: PathBuf,
    pub backup_root: PathBuf,
}

impl Paths {
    /// Resolve roots from an optional flag override plus config and environment.
    pub fn resolve(config: &Config, tasks_dir_flag: Option<&Path>) -> Paths {
        let tasks_root = tasks_dir_flag
            .map(Path::to_path_buf)
            .or_else(|| env_path("TASKDECK_TASKS_DIR"))
            .or_else(|| config.tasks_dir.clone())
            .unwrap_or_else(|| home_dir().join(".taskdeck").join("tasks"));

        let backup_root = env_path("TASKDECK_BACKUP_DIR")
            .or_else(|| config.backup_dir.clone())
            .unwrap_or_else(|| home_dir().join(".taskdeck").join("backups"));

        Paths {
            tasks_root,
            backup_root,
        }
    }

    /// Directory holding one JSON file per task for the given project
    pub fn project_dir(&self, project: &str) -> PathBuf {
        self.tasks_root.join(project)
    }

    /// Mirror directory for the given project's backups
    pub fn backup_project_dir(&self, project: &str) -> PathBuf {
        self.backup_root.join(project)
    }

    /// Path to the project's `_groups.json`
    pub fn groups_file(&self, project: &str) -> PathBuf {
        self.project_dir(project).join(GROUPS_FILE)
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// The user's home directory
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"))
}

/// True if a directory entry name follows the task-file naming rule:
/// a `.json` suffix and no reserved underscore prefix.
pub fn is_task_file_name(name: &str) -> bool {
    !name.starts_with('_') && name.ends_with(".json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_file_naming_rule() {
        assert!(is_task_file_name("1.json"));
        assert!(is_task_file_name("42.json"));
        assert!(!is_task_file_name("_groups.json"));
        assert!(!is_task_file_name("_anything.json"));
        assert!(!is_task_file_name("notes.txt"));
        assert!(!is_task_file_name("7.json.bak"));
    }

    #[test]
    fn flag_override_wins() {
        let config = Config {
            tasks_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        let paths = Paths::resolve(&config, Some(Path::new("/from/flag")));
        assert_eq!(paths.tasks_root, PathBuf::from("/from/flag"));
    }

    #[test]
    fn project_paths_compose() {
        let paths = Paths {
            tasks_root: PathBuf::from("/t"),
            backup_root: PathBuf::from("/b"),
        };
        assert_eq!(paths.project_dir("web"), PathBuf::from("/t/web"));
        assert_eq!(paths.backup_project_dir("web"), PathBuf::from("/b/web"));
        assert_eq!(paths.groups_file("web"), PathBuf::from("/t/web/_groups.json"));
    }
}
