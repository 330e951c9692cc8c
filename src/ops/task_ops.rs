use crate::io::StoreError;
use crate::io::group_store::GroupStore;
use crate::io::task_store::TaskStore;
use crate::model::task::{Task, TaskStatus};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    #[error("subject cannot be empty")]
    EmptySubject,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse a comma-separated list of task IDs, trimming whitespace and
/// dropping empty entries.
pub fn parse_id_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Human-readable labels for a list of task IDs: `#id subject` when the
/// task exists, bare `#id` for dangling references.
pub fn link_labels(store: &TaskStore, ids: &[String]) -> Vec<String> {
    ids.iter()
        .map(|id| match store.get_task(id) {
            Some(task) => format!("#{} {}", id, task.subject),
            None => format!("#{id}"),
        })
        .collect()
}

/// Validate and add a new task, registering its group when one is set, and
/// persist both stores. Returns the assigned ID.
pub fn create_task(
    tasks: &mut TaskStore,
    groups: &mut GroupStore,
    mut task: Task,
) -> Result<String, OpError> {
    task.subject = task.subject.trim().to_string();
    if task.subject.is_empty() {
        return Err(OpError::EmptySubject);
    }

    if let Some(group) = task.group().map(str::to_string)
        && groups.get_group(&group).is_none()
    {
        groups.ensure_group_exists(&group);
        groups.save()?;
    }

    let id = tasks.add_task(task);
    tasks.save()?;
    Ok(id)
}

/// Validate and apply a wholesale task replacement, registering its group
/// when one is set, and persist both stores.
pub fn apply_update(
    tasks: &mut TaskStore,
    groups: &mut GroupStore,
    mut task: Task,
) -> Result<(), OpError> {
    task.subject = task.subject.trim().to_string();
    if task.subject.is_empty() {
        return Err(OpError::EmptySubject);
    }

    if let Some(group) = task.group().map(str::to_string)
        && groups.get_group(&group).is_none()
    {
        groups.ensure_group_exists(&group);
        groups.save()?;
    }

    tasks.update_task(task)?;
    tasks.save()?;
    Ok(())
}

/// Set a task's status and persist.
pub fn set_status(store: &mut TaskStore, id: &str, status: TaskStatus) -> Result<(), OpError> {
    let mut task = store
        .get_task(id)
        .cloned()
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    task.status = status;
    store.update_task(task)?;
    store.save()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::paths::Paths;
    use tempfile::TempDir;

    fn stores(tmp: &TempDir) -> (TaskStore, GroupStore) {
        let paths = Paths {
            tasks_root: tmp.path().join("tasks"),
            backup_root: tmp.path().join("backups"),
        };
        (
            TaskStore::load(&paths, "p").unwrap(),
            GroupStore::load(&paths, "p").unwrap(),
        )
    }

    #[test]
    fn parse_id_list_trims_and_drops_empties() {
        assert_eq!(parse_id_list("1, 2,3"), ["1", "2", "3"]);
        assert_eq!(parse_id_list("  7  "), ["7"]);
        assert_eq!(parse_id_list(",,"), Vec::<String>::new());
        assert_eq!(parse_id_list(""), Vec::<String>::new());
    }

    #[test]
    fn link_labels_resolve_subjects() {
        let tmp = TempDir::new().unwrap();
        let (mut tasks, _) = stores(&tmp);
        tasks.add_task(Task::new("Build"));

        let labels = link_labels(&tasks, &["1".to_string(), "99".to_string()]);
        assert_eq!(labels, ["#1 Build", "#99"]);
    }

    #[test]
    fn create_rejects_blank_subject() {
        let tmp = TempDir::new().unwrap();
        let (mut tasks, mut groups) = stores(&tmp);
        let result = create_task(&mut tasks, &mut groups, Task::new("   "));
        assert!(matches!(result, Err(OpError::EmptySubject)));
        assert!(tasks.tasks.is_empty());
    }

    #[test]
    fn create_registers_new_group() {
        let tmp = TempDir::new().unwrap();
        let (mut tasks, mut groups) = stores(&tmp);
        let mut task = Task::new("Wire up CI");
        task.set_group("Infra");

        let id = create_task(&mut tasks, &mut groups, task).unwrap();
        assert_eq!(id, "1");
        assert!(groups.get_group("Infra").is_some());
    }

    #[test]
    fn update_trims_subject_and_persists() {
        let tmp = TempDir::new().unwrap();
        let (mut tasks, mut groups) = stores(&tmp);
        create_task(&mut tasks, &mut groups, Task::new("a")).unwrap();

        let mut edited = tasks.get_task("1").unwrap().clone();
        edited.subject = "  renamed  ".into();
        apply_update(&mut tasks, &mut groups, edited).unwrap();
        assert_eq!(tasks.get_task("1").unwrap().subject, "renamed");
    }

    #[test]
    fn set_status_unknown_id_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let (mut tasks, _) = stores(&tmp);
        let result = set_status(&mut tasks, "9", TaskStatus::Completed);
        assert!(matches!(
            result,
            Err(OpError::Store(StoreError::NotFound(_)))
        ));
    }
}
