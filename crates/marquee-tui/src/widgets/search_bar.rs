//! Search bar widget — text input + match count at the bottom of the screen.
//!
//! The typed query drives the client-side filter; the filter is reapplied by
//! the App shell on every edit, so this widget only owns the text state.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor (arrow keys while this pane
//!   is focused).
//! - `ClearInput` empties the query (`Ctrl+u`).

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// The filter text typed by the user.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl SearchBarState {
    /// Handle a key event from the app shell.
    ///
    /// Text-editing events (`Char`, `Backspace`, arrow keys) update the
    /// query string; all other events are ignored. Returns `true` when the
    /// query text changed, so the caller knows to reapply the filter.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "search: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    // Walk back one char boundary
                    let prev = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.query.remove(prev);
                    self.cursor = prev;
                    tracing::debug!(query = %self.query, cursor = self.cursor, "search: backspace");
                    true
                } else {
                    false
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    let next = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                    self.cursor = next;
                }
                false
            }
            AppEvent::ClearInput => {
                if self.query.is_empty() {
                    false
                } else {
                    self.clear();
                    tracing::debug!("search: query cleared");
                    true
                }
            }
            _ => false,
        }
    }

    /// Clear the query and reset the cursor (`Ctrl+u` while typing).
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    /// Number of movies passing the current filter (both lists combined).
    shown: usize,
    /// Number of movies published (both lists combined).
    total: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(
        state: &'a SearchBarState,
        shown: usize,
        total: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, shown, total, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Search")
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        // Split inner area: query text (fill) | match count (fixed width)
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(12)])
            .split(inner);

        // Query input
        let query_line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        // Match count, right-aligned:  12/35
        let count = format!("{:>10} ", format!("{}/{}", self.shown, self.total));
        Paragraph::new(Line::from(Span::styled(
            count,
            Style::default().add_modifier(Modifier::DIM),
        )))
        .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
