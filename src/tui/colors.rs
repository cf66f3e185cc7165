//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Status};

/// To Do column accent
pub const LAVENDER: Color = Color::Rgb(0xCF, 0xB7, 0xE8);
/// In Progress column accent
pub const AMBER: Color = Color::Rgb(0xF6, 0xBE, 0x38);
/// Complete column accent
pub const SEA_GREEN: Color = Color::Rgb(0x75, 0xC5, 0xC1);

pub const TEAL: Color = Color::Rgb(0, 128, 128);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const DARK_RED: Color = Color::Rgb(180, 30, 30);

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => LAVENDER,
        Status::InProgress => AMBER,
        Status::Complete => SEA_GREEN,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Gray,
        Priority::Normal => TEAL,
        Priority::Important => GOLD,
        Priority::Urgent => DARK_RED,
    }
}
