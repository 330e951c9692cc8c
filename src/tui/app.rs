use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config::load_config;
use crate::io::group_store::GroupStore;
use crate::io::paths::Paths;
use crate::io::task_store::{ProjectInfo, TaskStore, list_projects};
use crate::io::watcher::ProjectWatcher;
use crate::model::task::Task;
use crate::tui::form::{EditForm, GroupEditForm};
use crate::tui::list::{Filters, Row, build_rows, restore_cursor};
use crate::tui::textinput::TextInput;
use crate::tui::theme::Theme;

use super::{input, render};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Projects,
    Tasks,
    Detail,
    Edit,
    Groups,
    GroupEdit,
}

/// A loaded project: both stores plus the change watcher
pub struct Session {
    pub project: String,
    pub tasks: TaskStore,
    pub groups: GroupStore,
    pub watcher: Option<ProjectWatcher>,
}

/// Main application state
pub struct App {
    pub paths: Paths,
    pub theme: Theme,
    pub screen: Screen,
    pub should_quit: bool,
    /// Error or notice for the status row; cleared on the next keypress
    pub status_message: Option<String>,

    // Project picker
    pub projects: Vec<ProjectInfo>,
    pub projects_cursor: usize,

    // Active project
    pub session: Option<Session>,

    // Task list screen
    pub rows: Vec<Row>,
    pub cursor: usize,
    pub scroll: usize,
    pub filters: Filters,
    pub collapsed: HashSet<String>,
    pub search_active: bool,
    pub search_input: TextInput,
    /// Quick status change mode: next key picks the status
    pub status_pick: bool,

    // Detail screen
    pub detail_task: Option<String>,
    pub detail_scroll: usize,
    pub confirm_delete: bool,

    // Edit screen
    pub edit: Option<EditForm>,
    /// Where Esc returns to from the edit screen
    pub edit_return: Screen,

    // Group screens
    pub groups_cursor: usize,
    pub groups_confirm_delete: bool,
    pub group_edit: Option<GroupEditForm>,
}

impl App {
    pub fn new(paths: Paths, theme: Theme) -> Self {
        App {
            paths,
            theme,
            screen: Screen::Projects,
            should_quit: false,
            status_message: None,
            projects: Vec::new(),
            projects_cursor: 0,
            session: None,
            rows: Vec::new(),
            cursor: 0,
            scroll: 0,
            filters: Filters::default(),
            collapsed: HashSet::new(),
            search_active: false,
            search_input: TextInput::new("Search..."),
            status_pick: false,
            detail_task: None,
            detail_scroll: 0,
            confirm_delete: false,
            edit: None,
            edit_return: Screen::Tasks,
            groups_cursor: 0,
            groups_confirm_delete: false,
            group_edit: None,
        }
    }

    /// Reload the project list for the picker
    pub fn refresh_projects(&mut self) {
        match list_projects(&self.paths) {
            Ok(projects) => {
                self.projects = projects;
                self.projects_cursor = self
                    .projects_cursor
                    .min(self.projects.len().saturating_sub(1));
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Load both stores for a project and switch to the task list.
    pub fn open_project(&mut self, name: &str) {
        let tasks = match TaskStore::load(&self.paths, name) {
            Ok(store) => store,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return;
            }
        };
        let groups = match GroupStore::load(&self.paths, name) {
            Ok(store) => store,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return;
            }
        };
        // The watcher is an optimization; a project works without one
        let watcher = ProjectWatcher::start(&self.paths.project_dir(name)).ok();

        self.session = Some(Session {
            project: name.to_string(),
            tasks,
            groups,
            watcher,
        });
        self.filters = Filters::default();
        self.collapsed.clear();
        self.search_input.clear();
        self.search_active = false;
        self.status_pick = false;
        self.cursor = 0;
        self.scroll = 0;
        self.screen = Screen::Tasks;
        self.rebuild_rows();
    }

    /// Leave the project and return to the picker
    pub fn close_project(&mut self) {
        self.session = None;
        self.screen = Screen::Projects;
        self.refresh_projects();
    }

    /// Rebuild the task list rows, restoring the cursor to the previously
    /// selected task when it survived.
    pub fn rebuild_rows(&mut self) {
        let previous_task = self.selected_task_id().map(str::to_string);
        let Some(session) = &self.session else {
            self.rows.clear();
            self.cursor = 0;
            return;
        };
        self.rows = build_rows(
            &session.tasks.tasks,
            &session.groups.group_names(),
            &self.filters,
            &self.collapsed,
        );
        self.cursor = restore_cursor(&self.rows, previous_task.as_deref(), self.cursor);
    }

    /// The task ID under the cursor, if the cursor is on a task row
    pub fn selected_task_id(&self) -> Option<&str> {
        self.rows.get(self.cursor).and_then(Row::task_id)
    }

    /// The task under the cursor
    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.selected_task_id()?;
        self.session.as_ref()?.tasks.get_task(id)
    }

    /// The group header name under the cursor, if on a header row
    pub fn selected_group_header(&self) -> Option<&str> {
        match self.rows.get(self.cursor) {
            Some(Row::GroupHeader(name)) => Some(name),
            _ => None,
        }
    }

    /// Reload both stores from disk when an external writer touched them.
    ///
    /// Called before acting on a keypress and on every idle tick. The
    /// watcher only prompts an earlier check; the stores' modification-time
    /// comparison decides. A reload discards unsaved in-memory edits by
    /// design and preserves UI state (filters, collapse set, cursor task).
    pub fn poll_external_changes(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        // Drain watcher events; they carry no information beyond "look now"
        if let Some(watcher) = &session.watcher {
            let _ = watcher.poll();
        }
        if !(session.tasks.needs_reload() || session.groups.needs_reload()) {
            return;
        }
        self.reload_project();
    }

    /// Unconditionally re-read both stores, keeping UI state
    pub fn reload_project(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let name = session.project.clone();
        match (
            TaskStore::load(&self.paths, &name),
            GroupStore::load(&self.paths, &name),
        ) {
            (Ok(tasks), Ok(groups)) => {
                if let Some(session) = &mut self.session {
                    session.tasks = tasks;
                    session.groups = groups;
                }
                // A task open in detail may be gone now
                let detail_gone = self.screen == Screen::Detail
                    && match (&self.detail_task, &self.session) {
                        (Some(id), Some(session)) => session.tasks.get_task(id).is_none(),
                        _ => true,
                    };
                if detail_gone {
                    self.detail_task = None;
                    self.screen = Screen::Tasks;
                }
                self.rebuild_rows();
            }
            (Err(e), _) | (_, Err(e)) => self.status_message = Some(e.to_string()),
        }
    }
}

/// Run the TUI application
pub fn run(project: Option<&str>, tasks_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    let paths = Paths::resolve(&config, tasks_dir);
    let theme = Theme::from_config(&config.ui);

    let mut app = App::new(paths, theme);
    app.refresh_projects();
    if let Some(name) = project {
        app.open_project(name);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                app.poll_external_changes();
                input::handle_key(app, key);
            }
        } else {
            // Idle tick: same staleness check, just without a pending key
            app.poll_external_changes();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
