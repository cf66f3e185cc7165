//! Command implementations for the CLI interface.
//!
//! Each handler takes the open store, performs one operation and prints the
//! outcome. Validation failures exit with status 1 before the store is
//! touched. Mutations on an id that no longer exists are reported and leave
//! the board unchanged.

use std::io;

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::board::{columns, filter, status_counts, TaskFilter};
use crate::cli::Cli;
use crate::dnd::{self, DropEvent, DropTarget};
use crate::fields::{Priority, Status, StatusFilter, ViewMode};
use crate::format::{filter_bar, print_column, print_table, print_task};
use crate::seed::seed_tasks;
use crate::storage::KeyValueStore;
use crate::store::{StoreError, TaskStore};
use crate::task::TaskPatch;
use crate::tui::run::run_tui;
use crate::validate::{parse_assignees, validate_patch, TaskInput};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive board (the default).
    Ui,

    /// Add a new task.
    Add {
        /// Task name (1-100 characters).
        title: String,
        /// Status: todo | in-progress | complete.
        #[arg(long, value_enum, default_value_t = Status::Todo)]
        status: Status,
        /// Start date. Defaults to today.
        #[arg(long)]
        start: Option<String>,
        /// End date. Defaults to today.
        #[arg(long)]
        end: Option<String>,
        /// Comma-separated assignees. May be repeated.
        #[arg(long = "assignee")]
        assignees: Vec<String>,
        /// Priority: low | normal | important | urgent.
        #[arg(long, value_enum, default_value_t = Priority::Low)]
        priority: Priority,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
    },

    /// List tasks as a table.
    List {
        /// Only tasks whose title contains this text (case-insensitive).
        #[arg(long, default_value = "")]
        search: String,
        /// Status filter: all | todo | in-progress | complete.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
    },

    /// Print the kanban columns.
    Board {
        /// Only tasks whose title contains this text (case-insensitive).
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show a single task.
    View {
        id: String,
    },

    /// Change fields on a task.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Replace assignees. Comma-separated, may be repeated.
        #[arg(long = "assignee")]
        assignees: Vec<String>,
        /// Remove every assignee.
        #[arg(long, conflicts_with = "assignees")]
        clear_assignees: bool,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        desc: Option<String>,
        /// Remove the description.
        #[arg(long, conflicts_with = "desc")]
        clear_desc: bool,
    },

    /// Drop a task onto a column or another task.
    Move {
        /// Task being moved.
        id: String,
        /// Column id (todo | inProgress | complete), or `<column>-<anything>`.
        /// Any other target, or none, leaves the task where it is.
        target: Option<String>,
    },

    /// Move a task one step along: To Do, In Progress, Complete.
    Advance {
        id: String,
    },

    /// Delete a task.
    Delete {
        id: String,
    },

    /// Replace the saved board with the seed tasks.
    Reset,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn report_missing(err: StoreError) {
    println!("{err}; nothing changed.");
}

/// Launch the interactive board.
pub fn cmd_ui<S: KeyValueStore>(store: TaskStore<S>, view: ViewMode) {
    if let Err(e) = run_tui(store, view) {
        fail(format!("Board UI error: {e}"));
    }
}

/// Validate and add a new task.
pub fn cmd_add<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    title: String,
    status: Status,
    start: Option<String>,
    end: Option<String>,
    assignees: Vec<String>,
    priority: Priority,
    desc: Option<String>,
) {
    let input = TaskInput {
        title,
        status,
        start_date: start.unwrap_or_default(),
        end_date: end.unwrap_or_default(),
        assignees: assignees.join(","),
        priority,
        description: desc.unwrap_or_default(),
    };
    let draft = match input.with_default_dates(chrono::Local::now().date_naive()).validate() {
        Ok(draft) => draft,
        Err(errors) => {
            let msgs: Vec<String> = errors.iter().map(ToString::to_string).collect();
            fail(msgs.join("\n"));
        }
    };
    let task = store.create(draft);
    println!("Added task {}", task.id);
}

/// List tasks matching the search and status filter.
pub fn cmd_list<S: KeyValueStore>(store: &TaskStore<S>, search: String, status: StatusFilter) {
    let tasks = store.tasks();
    let shown = filter(tasks, &TaskFilter::new(search, status));
    println!("{}", filter_bar(&status_counts(tasks), status));
    println!();
    if shown.is_empty() {
        println!("No tasks found.");
        return;
    }
    print_table(&shown);
}

/// Print the three status columns.
pub fn cmd_board<S: KeyValueStore>(store: &TaskStore<S>, search: String) {
    let visible: Vec<_> = filter(store.tasks(), &TaskFilter::new(search, StatusFilter::All))
        .into_iter()
        .cloned()
        .collect();
    for (i, column) in columns(&visible).iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_column(column);
    }
}

pub fn cmd_view<S: KeyValueStore>(store: &TaskStore<S>, id: String) {
    match store.get(&id) {
        Some(task) => print_task(task),
        None => fail(format!("Task {id} not found.")),
    }
}

/// Merge the given fields into a task.
pub fn cmd_update<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    id: String,
    title: Option<String>,
    status: Option<Status>,
    start: Option<String>,
    end: Option<String>,
    assignees: Vec<String>,
    clear_assignees: bool,
    priority: Option<Priority>,
    desc: Option<String>,
    clear_desc: bool,
) {
    let patch = TaskPatch {
        title,
        status,
        start_date: start,
        end_date: end,
        assignees: if clear_assignees {
            Some(Vec::new())
        } else if assignees.is_empty() {
            None
        } else {
            Some(parse_assignees(&assignees.join(",")))
        },
        priority,
        description: if clear_desc { Some(None) } else { desc.map(Some) },
    };
    if patch.is_empty() {
        fail("Nothing to update.");
    }
    if let Err(e) = validate_patch(&patch) {
        fail(e);
    }
    match store.update(&id, &patch) {
        Ok(task) => println!("Updated task {}", task.id),
        Err(e) => report_missing(e),
    }
}

/// Simulate a drop of `id` onto `target`.
pub fn cmd_move<S: KeyValueStore>(store: &mut TaskStore<S>, id: String, target: Option<String>) {
    let over = target.as_deref().and_then(DropTarget::from_legacy_id);
    match dnd::apply(store, &DropEvent::new(id.clone(), over)) {
        Some(change) => println!("Moved task {} from {} to {}", change.task_id, change.from, change.to),
        None => println!("Task {id} not moved."),
    }
}

/// Move a task to the next status.
pub fn cmd_advance<S: KeyValueStore>(store: &mut TaskStore<S>, id: String) {
    let Some(current) = store.get(&id).map(|t| t.status) else {
        return report_missing(StoreError::NotFound(id));
    };
    if current == Status::Complete {
        println!("Task {id} is already complete.");
        return;
    }
    match dnd::apply(store, &DropEvent::onto_column(id, current.next())) {
        Some(change) => println!("Task {} is now {}", change.task_id, change.to),
        None => println!("Task not moved."),
    }
}

pub fn cmd_delete<S: KeyValueStore>(store: &mut TaskStore<S>, id: String) {
    match store.delete(&id) {
        Ok(task) => println!("Deleted task {} ({})", task.id, task.title),
        Err(e) => report_missing(e),
    }
}

pub fn cmd_reset<S: KeyValueStore>(store: &mut TaskStore<S>) {
    store.replace_all(seed_tasks());
    println!("Board reset to {} seed tasks.", store.len());
}

/// Generate shell completions.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
