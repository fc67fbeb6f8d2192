//! Ratatui widgets for the marquee TUI.

pub mod command_bar;
pub mod detail;
pub mod grid;
pub mod help;
pub mod rail;
pub mod search_bar;
pub mod status_bar;
