//! Vim-style command bar — a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` from any pane except the search bar. Displays a
//! `:` prefix followed by the typed command, exactly like Vim's command-line
//! mode. Pressing `Enter` parses and executes the command; `Escape` cancels.
//! Parsing and execution live in [`crate::commands`] and the App shell; this
//! widget only owns the text state.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Persistent state for the command bar.
#[derive(Debug, Default)]
pub struct CommandBarState {
    /// The text typed after the `:` prefix.
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
    /// Error message from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Reset to a blank, error-free state. Call when opening the bar.
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.error = None;
    }

    /// Handle a text-editing event while the command bar is focused.
    ///
    /// `Enter` and `Escape` are handled by the App shell before dispatch.
    pub fn handle(&mut self, event: &AppEvent) {
        // Any keypress dismisses the error display so the user can edit again.
        self.error = None;

        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.input.remove(prev);
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.input.len() {
                    let next = self.input[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.input.len());
                    self.cursor = next;
                }
            }
            AppEvent::ClearInput => {
                self.input.clear();
                self.cursor = 0;
            }
            _ => {}
        }
    }

    /// Absolute terminal column of the text cursor within `area`.
    ///
    /// The `:` glyph occupies column 0, so the cursor starts at column 1.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        let col = 1 + self.input[..self.cursor].chars().count() as u16;
        (area.x + col).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row command-bar overlay.
///
/// The caller is responsible for passing a 1-row `Rect` at the bottom of the
/// terminal. `CommandBar` clears that row with [`Clear`] and renders either
/// the `:<input>` prompt or an error message.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(
                format!("E  {err}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(":", self.theme.border_command_bar.add_modifier(Modifier::BOLD)),
                Span::raw(self.state.input.as_str()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn char_insert_and_backspace() {
        let mut s = CommandBarState::default();
        s.handle(&AppEvent::Char('f'));
        s.handle(&AppEvent::Char('o'));
        s.handle(&AppEvent::Char('o'));
        assert_eq!(s.input, "foo");
        assert_eq!(s.cursor, 3);
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.input, "fo");
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn clear_input_empties_the_line() {
        let mut s = CommandBarState::default();
        s.handle(&AppEvent::Char('q'));
        s.handle(&AppEvent::ClearInput);
        assert_eq!(s.input, "");
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn error_cleared_on_next_key() {
        let mut s = CommandBarState::default();
        s.error = Some("oops".to_string());
        s.handle(&AppEvent::Char('x'));
        assert!(s.error.is_none());
    }

    #[test]
    fn cursor_moves_left_and_right() {
        let mut s = CommandBarState::default();
        s.handle(&AppEvent::Char('a'));
        s.handle(&AppEvent::Char('b'));
        s.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(s.cursor, 1);
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.cursor, 2);
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut s = CommandBarState::default();
        s.handle(&AppEvent::Char('x'));
        s.error = Some("e".to_string());
        s.clear();
        assert_eq!(s.input, "");
        assert_eq!(s.cursor, 0);
        assert!(s.error.is_none());
    }
}
