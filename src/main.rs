//! # board - Kanban Task Board
//!
//! A file-backed task board for the terminal. Tasks sit in three status
//! columns (To Do, In Progress, Complete) and move between them by dropping a
//! card onto a column or onto another card.
//!
//! ## Key Features
//!
//! - **Kanban and list views**: columns with per-status counts, or a table with
//!   status filter buttons and title search
//! - **Drag and drop from the keyboard**: pick a card up with `Space`, aim, drop
//! - **Write-through storage**: every change is saved immediately to
//!   `<data dir>/tasks.json`; a missing or unreadable file falls back to a
//!   small seed board
//! - **Scriptable CLI**: every board operation is also a subcommand
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the board
//! board
//!
//! # Add a task
//! board add "Write release notes" --priority important --assignee "Ann,Bo"
//!
//! # Drop task 4 onto the complete column, or onto a card id inside it
//! board move 4 complete
//! board move 4 complete-6
//!
//! # Filtered list
//! board list --status in-progress --search patient
//! ```
//!
//! ## Configuration
//!
//! Flags beat environment variables (`TASKBOARD_DATA_DIR`, `TASKBOARD_CONFIG`,
//! `TASKBOARD_LOG`), which beat `<config dir>/taskboard/config.toml`, which
//! beats the built-in defaults. `RUST_LOG` overrides the log level.

use clap::Parser;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod dnd;
pub mod fields;
pub mod format;
pub mod logging;
pub mod seed;
pub mod storage;
pub mod store;
pub mod task;
pub mod validate;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
}

use cli::Cli;
use cmd::*;
use config::Config;
use storage::{FileStore, TaskRepository};
use store::TaskStore;

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Commands::Ui);

    // The UI owns the terminal, so it logs to a file; everything else to stderr.
    let _log_guard = match command {
        Commands::Ui => logging::init_file(&config.log_level, &config.log_file),
        _ => {
            logging::init_stderr(&config.log_level);
            None
        }
    };
    tracing::debug!(?config, "configuration resolved");

    let mut store = TaskStore::open(TaskRepository::new(FileStore::new(&config.data_dir)));

    match command {
        Commands::Ui => cmd_ui(store, config.default_view),

        Commands::Add { title, status, start, end, assignees, priority, desc } =>
            cmd_add(&mut store, title, status, start, end, assignees, priority, desc),

        Commands::List { search, status } => cmd_list(&store, search, status),

        Commands::Board { search } => cmd_board(&store, search),

        Commands::View { id } => cmd_view(&store, id),

        Commands::Update {
            id, title, status, start, end, assignees, clear_assignees, priority, desc, clear_desc,
        } => cmd_update(&mut store, id, title, status, start, end, assignees, clear_assignees,
                        priority, desc, clear_desc),

        Commands::Move { id, target } => cmd_move(&mut store, id, target),

        Commands::Advance { id } => cmd_advance(&mut store, id),

        Commands::Delete { id } => cmd_delete(&mut store, id),

        Commands::Reset => cmd_reset(&mut store),

        Commands::Completions { shell } => cmd_completions(shell),
    }
}
