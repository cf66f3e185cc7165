//! Enumerations for TUI state management.

/// What the board is currently taking keystrokes for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    Board,
    Search,
    CreateTask,
    ConfirmDelete,
    Detail,
    Help,
}

/// A card picked up on the kanban board and not yet dropped.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Drag {
    pub task_id: String,
    /// Column the card was lifted from.
    pub origin_column: usize,
}
