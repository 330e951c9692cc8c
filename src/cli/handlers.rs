use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config::load_config;
use crate::io::group_store::GroupStore;
use crate::io::paths::Paths;
use crate::io::task_store::{TaskStore, list_projects};
use crate::model::group::UNCATEGORIZED;
use crate::model::task::{Task, TaskStatus};
use crate::ops::task_ops;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    let paths = Paths::resolve(&config, cli.tasks_dir.as_deref());
    let json = cli.json;

    match cli.command {
        None => Ok(()),
        Some(cmd) => match cmd {
            Commands::Projects => cmd_projects(&paths, json),
            Commands::List(args) => cmd_list(&paths, args, json),
            Commands::Show(args) => cmd_show(&paths, args, json),
            Commands::Add(args) => cmd_add(&paths, args, json),
            Commands::Status(args) => cmd_status(&paths, args),
            Commands::Delete(args) => cmd_delete(&paths, args),
            Commands::Search(args) => cmd_search(&paths, args, json),
            Commands::Groups(args) => cmd_groups(&paths, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn cmd_projects(paths: &Paths, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let projects = list_projects(paths)?;
    if json {
        let out: Vec<ProjectJson> = projects
            .iter()
            .map(|p| ProjectJson {
                name: p.name.clone(),
                task_count: p.task_count,
            })
            .collect();
        print_json(&out)?;
        return Ok(());
    }
    if projects.is_empty() {
        println!("no projects under {}", paths.tasks_root.display());
        return Ok(());
    }
    for project in projects {
        println!("{} [{}]", project.name, project.task_count);
    }
    Ok(())
}

fn cmd_list(paths: &Paths, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::load(paths, &args.project)?;

    let status_filter = args.status.as_deref().unwrap_or("");
    let tasks: Vec<&Task> = store
        .tasks_by_status(status_filter)
        .into_iter()
        .filter(|t| match args.group.as_deref() {
            None => true,
            Some(UNCATEGORIZED) => t.group().is_none(),
            Some(group) => t.group() == Some(group),
        })
        .collect();

    if json {
        let out: Vec<TaskJson> = tasks.iter().map(|t| TaskJson::from(*t)).collect();
        print_json(&out)?;
        return Ok(());
    }
    for task in tasks {
        println!("{}", task_line(task));
    }
    Ok(())
}

fn cmd_show(paths: &Paths, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::load(paths, &args.project)?;
    let Some(task) = store.get_task(&args.id) else {
        return Err(format!("task not found: {}", args.id).into());
    };

    if json {
        print_json(&TaskJson::from(task))?;
        return Ok(());
    }

    println!("#{} {}", task.id, task.subject);
    println!("status: {}", task.status.as_str());
    println!("group: {}", task.group().unwrap_or(UNCATEGORIZED));
    if !task.owner.is_empty() {
        println!("owner: {}", task.owner);
    }
    if !task.description.is_empty() {
        println!("\n{}", task.description);
    }
    if !task.blocks.is_empty() {
        println!(
            "\nblocks: {}",
            task_ops::link_labels(&store, &task.blocks).join(", ")
        );
    }
    if !task.blocked_by.is_empty() {
        println!(
            "blocked by: {}",
            task_ops::link_labels(&store, &task.blocked_by).join(", ")
        );
    }
    Ok(())
}

fn cmd_add(paths: &Paths, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut tasks = TaskStore::load(paths, &args.project)?;
    let mut groups = GroupStore::load(paths, &args.project)?;

    let mut task = Task::new(args.subject);
    task.description = args.description.unwrap_or_default();
    task.owner = args.owner.unwrap_or_default();
    if let Some(group) = &args.group {
        task.set_group(group);
    }

    let id = task_ops::create_task(&mut tasks, &mut groups, task)?;
    if json {
        print_json(&AddedJson { id })?;
    } else {
        println!("added #{id}");
    }
    Ok(())
}

fn cmd_status(paths: &Paths, args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Some(status) = TaskStatus::parse(&args.status) else {
        return Err(format!(
            "invalid status '{}' (expected pending, in_progress, or completed)",
            args.status
        )
        .into());
    };
    let mut store = TaskStore::load(paths, &args.project)?;
    task_ops::set_status(&mut store, &args.id, status)?;
    println!("#{} -> {}", args.id, status.as_str());
    Ok(())
}

fn cmd_delete(paths: &Paths, args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TaskStore::load(paths, &args.project)?;
    store.delete_task(&args.id)?;
    store.save()?;
    println!("deleted #{}", args.id);
    Ok(())
}

fn cmd_search(
    paths: &Paths,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::load(paths, &args.project)?;
    let matches = store.search(&args.query);

    if json {
        let out: Vec<TaskJson> = matches.iter().map(|t| TaskJson::from(*t)).collect();
        print_json(&out)?;
        return Ok(());
    }
    for task in matches {
        println!("{}", task_line(task));
    }
    Ok(())
}

fn cmd_groups(
    paths: &Paths,
    args: GroupsArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = GroupStore::load(paths, &args.project)?;

    if json {
        let out: Vec<GroupJson> = store
            .groups
            .iter()
            .map(|g| GroupJson {
                name: g.name.clone(),
                order: g.order,
                color: g.color.clone(),
            })
            .collect();
        print_json(&out)?;
        return Ok(());
    }
    for group in &store.groups {
        println!("{} {} ({})", group.order, group.name, group.color);
    }
    Ok(())
}
