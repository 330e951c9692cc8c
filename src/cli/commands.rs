use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "td",
    about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - your task list is a directory of JSON files"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Open the TUI directly on this project
    #[arg(short, long)]
    pub project: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override the tasks root directory
    #[arg(long, global = true, env = "TASKDECK_TASKS_DIR")]
    pub tasks_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects under the tasks root
    Projects,
    /// List a project's tasks
    List(ListArgs),
    /// Show one task in full
    Show(ShowArgs),
    /// Add a task
    Add(AddArgs),
    /// Set a task's status
    Status(StatusArgs),
    /// Delete a task (cleans up dependency links)
    Delete(DeleteArgs),
    /// Search tasks by substring
    Search(SearchArgs),
    /// List a project's groups
    Groups(GroupsArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Project name
    pub project: String,
    /// Filter by status (pending, in_progress, completed; default all)
    #[arg(long)]
    pub status: Option<String>,
    /// Filter by group name
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Project name
    pub project: String,
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Project name
    pub project: String,
    /// Task subject
    pub subject: String,
    /// Task description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Group name (created if missing)
    #[arg(short, long)]
    pub group: Option<String>,
    /// Owner
    #[arg(short, long)]
    pub owner: Option<String>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Project name
    pub project: String,
    /// Task ID
    pub id: String,
    /// New status: pending, in_progress, or completed
    pub status: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Project name
    pub project: String,
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Project name
    pub project: String,
    /// Substring to match in subject or description (case-insensitive)
    pub query: String,
}

#[derive(Args)]
pub struct GroupsArgs {
    /// Project name
    pub project: String,
}
