use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::model::group::UNCATEGORIZED;
use crate::model::task::{Task, TaskStatus};

/// One row of the task list: a group header or a task beneath one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    GroupHeader(String),
    /// Task row, by ID
    Task(String),
}

impl Row {
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Row::Task(id) => Some(id),
            Row::GroupHeader(_) => None,
        }
    }
}

/// Active filters on the task list screen
#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// None shows every status
    pub status: Option<TaskStatus>,
    /// None shows every group; `UNCATEGORIZED` targets unresolved tasks
    pub group: Option<String>,
    /// Case-insensitive substring over subject + description
    pub query: String,
    pub hide_completed: bool,
}

impl Filters {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status
            && task.status != status
        {
            return false;
        }
        if self.hide_completed && task.status == TaskStatus::Completed {
            return false;
        }
        if let Some(ref group) = self.group
            && resolved_group(task) != group
        {
            return false;
        }
        task.matches_query(&self.query)
    }

    /// Advance the status filter: all → pending → in_progress → completed → all
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(TaskStatus::Pending),
            Some(TaskStatus::Pending) => Some(TaskStatus::InProgress),
            Some(TaskStatus::InProgress) => Some(TaskStatus::Completed),
            Some(TaskStatus::Completed) => None,
        };
    }

    /// Advance the group filter through: all, each registered group in
    /// display order, Uncategorized, then back to all. A filter value no
    /// longer in the enumeration (e.g. a deleted group) resets to all.
    pub fn cycle_group(&mut self, registered: &[String]) {
        let mut cycle: Vec<Option<String>> = Vec::with_capacity(registered.len() + 2);
        cycle.push(None);
        cycle.extend(registered.iter().cloned().map(Some));
        cycle.push(Some(UNCATEGORIZED.to_string()));

        let position = cycle.iter().position(|g| *g == self.group);
        self.group = match position {
            Some(i) => cycle[(i + 1) % cycle.len()].clone(),
            None => None,
        };
    }
}

/// A task's display bucket: its group name, or the Uncategorized fallback.
pub fn resolved_group(task: &Task) -> &str {
    task.group().unwrap_or(UNCATEGORIZED)
}

/// Compose the ordered, flattened row list for the task screen.
///
/// Registered groups come first in their stored order; buckets not in the
/// registered order (ad hoc metadata groups and Uncategorized) follow,
/// sorted alphabetically so output is deterministic. Tasks appear directly
/// beneath their header unless that group is collapsed. Groups with no
/// matching tasks emit no header.
pub fn build_rows(
    tasks: &[Task],
    registered_order: &[String],
    filters: &Filters,
    collapsed: &HashSet<String>,
) -> Vec<Row> {
    let mut buckets: BTreeMap<&str, Vec<&Task>> = BTreeMap::new();
    for task in tasks.iter().filter(|t| filters.matches(t)) {
        buckets.entry(resolved_group(task)).or_default().push(task);
    }

    let mut rows = Vec::new();
    let mut emit = |name: &str, tasks: Vec<&Task>, rows: &mut Vec<Row>| {
        rows.push(Row::GroupHeader(name.to_string()));
        if !collapsed.contains(name) {
            rows.extend(tasks.iter().map(|t| Row::Task(t.id.clone())));
        }
    };

    for name in registered_order {
        if let Some(tasks) = buckets.remove(name.as_str()) {
            emit(name, tasks, &mut rows);
        }
    }
    // Remainder: alphabetical by bucket-map order
    for (name, tasks) in buckets {
        emit(name, tasks, &mut rows);
    }

    rows
}

/// Clamp the cursor into the new row list after a rebuild, preferring the
/// row of the previously selected task when that task is still present.
pub fn restore_cursor(rows: &[Row], previous_task: Option<&str>, previous_cursor: usize) -> usize {
    if let Some(id) = previous_task
        && let Some(idx) = rows.iter().position(|r| r.task_id() == Some(id))
    {
        return idx;
    }
    previous_cursor.min(rows.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, group: Option<&str>) -> Task {
        let mut t = Task::new(format!("task {id}"));
        t.id = id.to_string();
        if let Some(g) = group {
            t.set_group(g);
        }
        t
    }

    fn header_names(rows: &[Row]) -> Vec<&str> {
        rows.iter()
            .filter_map(|r| match r {
                Row::GroupHeader(name) => Some(name.as_str()),
                Row::Task(_) => None,
            })
            .collect()
    }

    #[test]
    fn registered_order_then_alphabetical_remainder() {
        let tasks = vec![
            task("1", Some("Zulu")),
            task("2", Some("Beta")),
            task("3", None),
            task("4", Some("Alpha")),
            task("5", Some("Mike")),
        ];
        // Only Mike and Zulu are registered, deliberately not alphabetical
        let registered = vec!["Zulu".to_string(), "Mike".to_string()];
        let rows = build_rows(&tasks, &registered, &Filters::default(), &HashSet::new());

        assert_eq!(
            header_names(&rows),
            ["Zulu", "Mike", "Alpha", "Beta", UNCATEGORIZED]
        );
    }

    #[test]
    fn tasks_sit_under_their_headers() {
        let tasks = vec![task("1", Some("A")), task("2", Some("A")), task("3", None)];
        let rows = build_rows(&tasks, &[], &Filters::default(), &HashSet::new());
        assert_eq!(
            rows,
            vec![
                Row::GroupHeader("A".into()),
                Row::Task("1".into()),
                Row::Task("2".into()),
                Row::GroupHeader(UNCATEGORIZED.into()),
                Row::Task("3".into()),
            ]
        );
    }

    #[test]
    fn collapsed_group_hides_tasks_but_keeps_header() {
        let tasks = vec![task("1", Some("A")), task("2", None)];
        let collapsed: HashSet<String> = ["A".to_string()].into();
        let rows = build_rows(&tasks, &[], &Filters::default(), &collapsed);
        assert_eq!(
            rows,
            vec![
                Row::GroupHeader("A".into()),
                Row::GroupHeader(UNCATEGORIZED.into()),
                Row::Task("2".into()),
            ]
        );
    }

    #[test]
    fn empty_groups_emit_no_header() {
        let tasks = vec![task("1", Some("A"))];
        let registered = vec!["A".to_string(), "Empty".to_string()];
        let rows = build_rows(&tasks, &registered, &Filters::default(), &HashSet::new());
        assert_eq!(header_names(&rows), ["A"]);
    }

    #[test]
    fn status_filter_and_hide_completed() {
        let mut done = task("1", None);
        done.status = TaskStatus::Completed;
        let tasks = vec![done, task("2", None)];

        let filters = Filters {
            status: Some(TaskStatus::Completed),
            ..Filters::default()
        };
        let rows = build_rows(&tasks, &[], &filters, &HashSet::new());
        assert_eq!(rows.iter().filter_map(Row::task_id).collect::<Vec<_>>(), ["1"]);

        let filters = Filters {
            hide_completed: true,
            ..Filters::default()
        };
        let rows = build_rows(&tasks, &[], &filters, &HashSet::new());
        assert_eq!(rows.iter().filter_map(Row::task_id).collect::<Vec<_>>(), ["2"]);

        // Both together: hide-completed wins, nothing matches
        let filters = Filters {
            status: Some(TaskStatus::Completed),
            hide_completed: true,
            ..Filters::default()
        };
        assert!(build_rows(&tasks, &[], &filters, &HashSet::new()).is_empty());
    }

    #[test]
    fn group_filter_targets_uncategorized() {
        let tasks = vec![task("1", Some("A")), task("2", None)];
        let filters = Filters {
            group: Some(UNCATEGORIZED.to_string()),
            ..Filters::default()
        };
        let rows = build_rows(&tasks, &[], &filters, &HashSet::new());
        assert_eq!(rows.iter().filter_map(Row::task_id).collect::<Vec<_>>(), ["2"]);
    }

    #[test]
    fn query_filter_matches_substrings() {
        let mut a = task("1", None);
        a.subject = "Fix the parser".into();
        let mut b = task("2", None);
        b.description = "parser cleanup".into();
        let tasks = vec![a, b, task("3", None)];

        let filters = Filters {
            query: "PARSER".into(),
            ..Filters::default()
        };
        let rows = build_rows(&tasks, &[], &filters, &HashSet::new());
        assert_eq!(
            rows.iter().filter_map(Row::task_id).collect::<Vec<_>>(),
            ["1", "2"]
        );
    }

    #[test]
    fn status_cycle_wraps_through_all() {
        let mut filters = Filters::default();
        let mut seen = vec![filters.status];
        for _ in 0..4 {
            filters.cycle_status();
            seen.push(filters.status);
        }
        assert_eq!(
            seen,
            vec![
                None,
                Some(TaskStatus::Pending),
                Some(TaskStatus::InProgress),
                Some(TaskStatus::Completed),
                None,
            ]
        );
    }

    #[test]
    fn group_cycle_walks_registered_then_uncategorized() {
        let registered = vec!["A".to_string(), "B".to_string()];
        let mut filters = Filters::default();

        filters.cycle_group(&registered);
        assert_eq!(filters.group.as_deref(), Some("A"));
        filters.cycle_group(&registered);
        assert_eq!(filters.group.as_deref(), Some("B"));
        filters.cycle_group(&registered);
        assert_eq!(filters.group.as_deref(), Some(UNCATEGORIZED));
        filters.cycle_group(&registered);
        assert_eq!(filters.group, None);
    }

    #[test]
    fn group_cycle_resets_on_stale_value() {
        let mut filters = Filters {
            group: Some("Deleted".to_string()),
            ..Filters::default()
        };
        filters.cycle_group(&["A".to_string()]);
        assert_eq!(filters.group, None);
    }

    #[test]
    fn cursor_restores_to_moved_task() {
        let before = vec![
            Row::GroupHeader("A".into()),
            Row::Task("1".into()),
            Row::Task("2".into()),
        ];
        let after = vec![
            Row::GroupHeader("B".into()),
            Row::Task("3".into()),
            Row::GroupHeader("A".into()),
            Row::Task("2".into()),
        ];
        // Cursor sat on task 2 at index 2; after the rebuild it moved to 3
        let previous_id = before[2].task_id();
        assert_eq!(restore_cursor(&after, previous_id, 2), 3);
    }

    #[test]
    fn cursor_clamps_when_task_vanished() {
        let rows = vec![Row::GroupHeader("A".into()), Row::Task("1".into())];
        assert_eq!(restore_cursor(&rows, Some("gone"), 5), 1);
        assert_eq!(restore_cursor(&[], Some("gone"), 5), 0);
        assert_eq!(restore_cursor(&rows, None, 0), 0);
    }
}
