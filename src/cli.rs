use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::fields::ViewMode;

/// File-backed kanban task board.
/// Tasks are stored in <data-dir>/tasks.json. With no subcommand the board UI opens.
#[derive(Parser, Debug)]
#[command(name = "board", version, about = "Kanban task board for the terminal")]
pub struct Cli {
    /// Directory holding the saved board.
    #[arg(long, global = true, env = "TASKBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/taskboard/config.toml).
    #[arg(long, global = true, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "board=debug". RUST_LOG takes precedence.
    #[arg(long, global = true, env = "TASKBOARD_LOG")]
    pub log_level: Option<String>,

    /// Log file used while the board UI owns the terminal.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Layout the board UI opens in.
    #[arg(long, global = true, value_enum)]
    pub view: Option<ViewMode>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
