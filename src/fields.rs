//! Enumerations and field types for the task board.
//!
//! This module defines the structured values a task carries (status and
//! priority), the status filter used by the list view, and the board view mode.
//! Wire spellings follow the persisted JSON layout: statuses are `todo`,
//! `inProgress` and `complete`; priorities are capitalised.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task status. Drives column placement on the board.
///
/// Any status may be set from any other in one step; there is no enforced
/// workflow order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    Todo,
    #[value(alias = "inProgress")]
    InProgress,
    Complete,
}

impl Status {
    /// All statuses in column order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Complete];

    /// Identifier used on the wire and as the column id.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "inProgress",
            Status::Complete => "complete",
        }
    }

    /// Look a status up by its exact column id.
    pub fn from_id(id: &str) -> Option<Status> {
        Status::ALL.into_iter().find(|s| s.as_str() == id)
    }

    /// Column heading.
    pub fn title(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Complete => "Complete",
        }
    }

    /// Column accent colour as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            Status::Todo => "#CFB7E8",
            Status::InProgress => "#F6BE38",
            Status::Complete => "#75C5C1",
        }
    }

    /// The status an "advance" action moves to. `Complete` stays put.
    pub fn next(self) -> Status {
        match self {
            Status::Todo => Status::InProgress,
            Status::InProgress | Status::Complete => Status::Complete,
        }
    }

    /// Position of the status in column order.
    pub fn index(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Complete => 2,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Four-level priority, `Urgent` highest.
///
/// Older saved boards spell the second level `Medium`; it is read as `Normal`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    #[default]
    Low,
    #[serde(alias = "Medium")]
    #[value(alias = "medium")]
    Normal,
    Important,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Normal, Priority::Important, Priority::Urgent];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Normal => "Normal",
            Priority::Important => "Important",
            Priority::Urgent => "Urgent",
        }
    }

    /// Badge colour name.
    pub fn color(self) -> &'static str {
        match self {
            Priority::Low => "gray",
            Priority::Normal => "teal",
            Priority::Important => "yellow",
            Priority::Urgent => "red",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter for the list view: everything, or exactly one status.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Todo,
    #[value(alias = "inProgress")]
    InProgress,
    Complete,
}

impl StatusFilter {
    /// Filter choices in button order.
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Todo,
        StatusFilter::InProgress,
        StatusFilter::Complete,
    ];

    /// The single status selected, or `None` for `All`.
    pub fn status(self) -> Option<Status> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Todo => Some(Status::Todo),
            StatusFilter::InProgress => Some(Status::InProgress),
            StatusFilter::Complete => Some(Status::Complete),
        }
    }

    pub fn matches(self, status: Status) -> bool {
        self.status().map_or(true, |s| s == status)
    }

    pub fn label(self) -> &'static str {
        match self.status() {
            None => "All",
            Some(s) => s.title(),
        }
    }
}

impl From<Status> for StatusFilter {
    fn from(status: Status) -> Self {
        match status {
            Status::Todo => StatusFilter::Todo,
            Status::InProgress => StatusFilter::InProgress,
            Status::Complete => StatusFilter::Complete,
        }
    }
}

/// Which layout the board opens in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Kanban,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Kanban => ViewMode::List,
            ViewMode::List => ViewMode::Kanban,
        }
    }
}
