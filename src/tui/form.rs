use crate::io::group_store::GroupStore;
use crate::io::task_store::TaskStore;
use crate::model::group::{DEFAULT_COLORS, TaskGroup};
use crate::model::task::{Task, TaskStatus};
use crate::ops::task_ops::parse_id_list;
use crate::tui::textinput::{TextArea, TextInput};

/// Focusable fields of the task edit form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Subject,
    Description,
    Status,
    Group,
    Owner,
    Blocks,
    BlockedBy,
}

impl EditField {
    const ORDER: [EditField; 7] = [
        EditField::Subject,
        EditField::Description,
        EditField::Status,
        EditField::Group,
        EditField::Owner,
        EditField::Blocks,
        EditField::BlockedBy,
    ];

    pub fn next(self) -> EditField {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> EditField {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Searchable task picker for the blocks / blocked-by fields
#[derive(Debug)]
pub struct Picker {
    /// Which field the selection lands in
    pub field: EditField,
    pub search: TextInput,
    /// `(id, status, subject)` of tasks matching the search
    pub matches: Vec<(String, TaskStatus, String)>,
    pub cursor: usize,
    /// Selected IDs, in toggle order
    pub selected: Vec<String>,
}

impl Picker {
    pub fn toggle_current(&mut self) {
        let Some((id, _, _)) = self.matches.get(self.cursor) else {
            return;
        };
        let id = id.clone();
        match self.selected.iter().position(|s| *s == id) {
            Some(i) => {
                self.selected.remove(i);
            }
            None => self.selected.push(id),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Refill matches from the store, excluding the task being edited.
    pub fn refresh(&mut self, store: &TaskStore, editing: Option<&str>) {
        let query = self.search.value.to_lowercase();
        self.matches = store
            .tasks
            .iter()
            .filter(|t| editing != Some(t.id.as_str()))
            .filter(|t| {
                query.is_empty()
                    || t.subject.to_lowercase().contains(&query)
                    || t.id.contains(&query)
            })
            .map(|t| (t.id.clone(), t.status, t.subject.clone()))
            .collect();
        self.cursor = self.cursor.min(self.matches.len().saturating_sub(1));
    }
}

/// State of the task create/edit screen
#[derive(Debug)]
pub struct EditForm {
    /// None when creating a new task
    pub task_id: Option<String>,
    /// The task as loaded, so untouched fields (metadata, activeForm)
    /// survive a wholesale update
    base: Task,
    pub subject: TextInput,
    pub description: TextArea,
    pub owner: TextInput,
    pub blocks: TextInput,
    pub blocked_by: TextInput,
    pub status_idx: usize,
    /// Index into `group_options`; 0 is "(none)"
    pub group_idx: usize,
    pub group_options: Vec<String>,
    pub focus: EditField,
    pub picker: Option<Picker>,
}

impl EditForm {
    pub fn new_task(groups: &GroupStore) -> Self {
        EditForm {
            task_id: None,
            base: Task::default(),
            subject: TextInput::new("Task subject"),
            description: TextArea::new("Task description..."),
            owner: TextInput::new("Owner (optional)"),
            blocks: TextInput::new("Task IDs, comma-separated"),
            blocked_by: TextInput::new("Task IDs, comma-separated"),
            status_idx: 0,
            group_idx: 0,
            group_options: group_options(groups),
            focus: EditField::Subject,
            picker: None,
        }
    }

    pub fn for_task(task: &Task, groups: &GroupStore) -> Self {
        let mut group_options = group_options(groups);
        // An ad hoc group (referenced by the task but never registered)
        // still has to be selectable, or editing would silently drop it
        if let Some(group) = task.group()
            && !group_options.iter().any(|o| o == group)
        {
            group_options.push(group.to_string());
        }
        let group_idx = task
            .group()
            .and_then(|g| group_options.iter().position(|o| o == g))
            .unwrap_or(0);
        let status_idx = TaskStatus::ALL
            .iter()
            .position(|s| *s == task.status)
            .unwrap_or(0);

        EditForm {
            task_id: Some(task.id.clone()),
            base: task.clone(),
            subject: TextInput::with_value("Task subject", &task.subject),
            description: {
                let mut area = TextArea::new("Task description...");
                area.set_value(&task.description);
                area
            },
            owner: TextInput::with_value("Owner (optional)", &task.owner),
            blocks: TextInput::with_value("Task IDs, comma-separated", &task.blocks.join(", ")),
            blocked_by: TextInput::with_value(
                "Task IDs, comma-separated",
                &task.blocked_by.join(", "),
            ),
            status_idx,
            group_idx,
            group_options,
            focus: EditField::Subject,
            picker: None,
        }
    }

    pub fn selected_status(&self) -> TaskStatus {
        TaskStatus::ALL[self.status_idx.min(TaskStatus::ALL.len() - 1)]
    }

    /// The selected group name, or None for "(none)"
    pub fn selected_group(&self) -> Option<&str> {
        if self.group_idx == 0 {
            None
        } else {
            self.group_options.get(self.group_idx).map(String::as_str)
        }
    }

    /// Assemble the task from the form fields, on top of the loaded base.
    pub fn build_task(&self) -> Task {
        let mut task = self.base.clone();
        task.subject = self.subject.value.trim().to_string();
        task.description = self.description.value.trim().to_string();
        task.status = self.selected_status();
        task.owner = self.owner.value.trim().to_string();
        task.blocks = parse_id_list(&self.blocks.value);
        task.blocked_by = parse_id_list(&self.blocked_by.value);
        task.set_group(self.selected_group().unwrap_or(""));
        task
    }

    /// Open the task picker for the currently focused link field, seeding
    /// the selection from the field's current value.
    pub fn open_picker(&mut self, store: &TaskStore) {
        let field = self.focus;
        let seed = match field {
            EditField::Blocks => parse_id_list(&self.blocks.value),
            EditField::BlockedBy => parse_id_list(&self.blocked_by.value),
            _ => return,
        };
        let mut picker = Picker {
            field,
            search: TextInput::new("Type to search tasks..."),
            matches: Vec::new(),
            cursor: 0,
            selected: seed,
        };
        picker.refresh(store, self.task_id.as_deref());
        self.picker = Some(picker);
    }

    /// Write the picker's selection back into its field and close it.
    pub fn apply_picker(&mut self) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        let value = picker.selected.join(", ");
        match picker.field {
            EditField::Blocks => self.blocks.set_value(&value),
            EditField::BlockedBy => self.blocked_by.set_value(&value),
            _ => {}
        }
    }
}

fn group_options(groups: &GroupStore) -> Vec<String> {
    let mut options = vec!["(none)".to_string()];
    options.extend(groups.group_names());
    options
}

/// State of the group create/edit screen
#[derive(Debug)]
pub struct GroupEditForm {
    /// The group as loaded; None when creating
    pub original: Option<TaskGroup>,
    pub name: TextInput,
    pub color_idx: usize,
    /// 0 = name, 1 = color
    pub focus: usize,
}

impl GroupEditForm {
    pub fn new_group() -> Self {
        GroupEditForm {
            original: None,
            name: TextInput::new("Group name"),
            color_idx: 0,
            focus: 0,
        }
    }

    pub fn for_group(group: &TaskGroup) -> Self {
        let color_idx = DEFAULT_COLORS
            .iter()
            .position(|c| *c == group.color)
            .unwrap_or(0);
        GroupEditForm {
            original: Some(group.clone()),
            name: TextInput::with_value("Group name", &group.name),
            color_idx,
            focus: 0,
        }
    }

    pub fn selected_color(&self) -> &'static str {
        DEFAULT_COLORS[self.color_idx.min(DEFAULT_COLORS.len() - 1)]
    }
}
