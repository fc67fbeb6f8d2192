//! Movie grid widget — the scrollable card grid of the popular list.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `←` / `h`, `→` / `l` | Move cursor one card |
//! | `↑` / `k`, `↓` / `j` | Move cursor one row |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//! | `G` | Jump to the last card |
//!
//! # Scroll semantics
//!
//! `scroll_row` = index of the first visible card row. The cursor is always
//! kept within the visible window; moving it past the edge auto-scrolls.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use marquee_core::{FeedState, Movie};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

/// Card height in terminal rows: 2 border rows + title, genre, year.
const CARD_HEIGHT: u16 = 5;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct GridState {
    /// The movies currently shown (published list with the filter applied).
    pub movies: Vec<Movie>,
    /// Absolute index into `movies` of the highlighted card.
    pub cursor: usize,
    /// Index of the first visible card row.
    pub scroll_row: usize,
    /// Cards per row.
    pub columns: u16,
    /// Whether the release-year line is shown on each card.
    pub show_release_dates: bool,
    /// Cached from the last render so `handle()` can do cursor-aware scrolling.
    last_rows: Cell<usize>,
}

impl GridState {
    pub fn new(columns: u16, show_release_dates: bool) -> Self {
        Self {
            movies: Vec::new(),
            cursor: 0,
            scroll_row: 0,
            columns: columns.max(1),
            show_release_dates,
            last_rows: Cell::new(4),
        }
    }

    /// Replace the visible list (feed update or filter change), keeping the
    /// cursor in bounds.
    pub fn set_movies(&mut self, movies: Vec<Movie>) {
        self.movies = movies;
        self.cursor = self.cursor.min(self.movies.len().saturating_sub(1));
        self.ensure_cursor_visible();
    }

    /// The movie under the cursor, if any.
    pub fn selected(&self) -> Option<&Movie> {
        self.movies.get(self.cursor)
    }

    fn cols(&self) -> usize {
        self.columns.max(1) as usize
    }

    /// Total card rows, including a possibly partial last row.
    fn total_rows(&self) -> usize {
        self.movies.len().div_ceil(self.cols())
    }

    fn visible_rows(&self) -> usize {
        self.last_rows.get().max(1)
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.movies.len();
        if total == 0 {
            return;
        }

        match event {
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "grid: cursor left");
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor + 1 < total {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "grid: cursor right");
            }
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(self.cols());
                tracing::debug!(cursor = self.cursor, "grid: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + self.cols() < total {
                    self.cursor += self.cols();
                } else {
                    self.cursor = total - 1;
                }
                tracing::debug!(cursor = self.cursor, "grid: cursor down");
            }

            AppEvent::ScrollUp => {
                self.scroll_row = self.scroll_row.saturating_sub(self.visible_rows());
                self.cursor = self.scroll_row * self.cols();
                tracing::debug!(scroll_row = self.scroll_row, "grid: page up");
            }
            AppEvent::ScrollDown => {
                let max_row = self.total_rows().saturating_sub(1);
                self.scroll_row = (self.scroll_row + self.visible_rows()).min(max_row);
                self.cursor = (self.scroll_row * self.cols()).min(total - 1);
                tracing::debug!(scroll_row = self.scroll_row, "grid: page down");
            }

            AppEvent::ScrollToEnd => {
                self.cursor = total - 1;
                tracing::debug!(cursor = self.cursor, "grid: jump to end");
            }

            _ => {}
        }

        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        let row = self.cursor / self.cols();
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + self.visible_rows() {
            self.scroll_row = row + 1 - self.visible_rows();
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct MovieGrid<'a> {
    state: &'a GridState,
    /// Feed status for the placeholder when nothing is loaded yet.
    status: &'a FeedState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> MovieGrid<'a> {
    pub fn new(
        state: &'a GridState,
        status: &'a FeedState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, status, focused, theme }
    }
}

impl Widget for MovieGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Movies").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        // Loading / error / empty placeholders
        let placeholder = match self.status {
            FeedState::Loading => Some(Line::from(Span::styled(
                " fetching feed… ",
                self.theme.status_loading,
            ))),
            FeedState::Failed(reason) => Some(Line::from(Span::styled(
                format!(" feed error: {reason} "),
                self.theme.status_failed,
            ))),
            FeedState::Loaded(_) if self.state.movies.is_empty() => Some(Line::from(
                Span::styled(" no matches ", Style::default().add_modifier(Modifier::DIM)),
            )),
            FeedState::Loaded(_) => None,
        };
        if let Some(line) = placeholder {
            Paragraph::new(line).render(inner, buf);
            return;
        }

        let rows_visible = (inner.height / CARD_HEIGHT).max(1) as usize;
        // Cache for handle() — safe because draw always runs before handle()
        self.state.last_rows.set(rows_visible);

        let cols = self.state.cols();
        let total_rows = self.state.total_rows();
        let first_row = self.state.scroll_row.min(total_rows.saturating_sub(1));
        let last_row = (first_row + rows_visible).min(total_rows);

        // Leave a 1-column strip for the scrollbar.
        let grid_area = Rect { width: inner.width.saturating_sub(1), ..inner };

        for (slot, row) in (first_row..last_row).enumerate() {
            let row_area = Rect {
                y: inner.y + (slot as u16) * CARD_HEIGHT,
                height: CARD_HEIGHT,
                ..grid_area
            };
            let constraints: Vec<Constraint> =
                (0..cols).map(|_| Constraint::Ratio(1, cols as u32)).collect();
            let cells = Layout::default()
                .direction(LayoutDir::Horizontal)
                .constraints(constraints)
                .split(row_area);

            for col in 0..cols {
                let idx = row * cols + col;
                let Some(movie) = self.state.movies.get(idx) else {
                    break;
                };
                let selected = self.focused && idx == self.state.cursor;
                render_card(
                    movie,
                    selected,
                    self.state.show_release_dates,
                    self.theme,
                    cells[col],
                    buf,
                );
            }
        }

        if total_rows > 0 {
            let mut sb_state = ScrollbarState::new(total_rows)
                .position(first_row)
                .viewport_content_length(rows_visible);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                Rect {
                    x: inner.right().saturating_sub(1),
                    width: 1,
                    ..inner
                },
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Card rendering
// ---------------------------------------------------------------------------

fn render_card(
    movie: &Movie,
    selected: bool,
    show_release_dates: bool,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let border_style = if selected {
        theme.border_focused
    } else {
        theme.border_unfocused
    };

    let block = Block::bordered().border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut title_style = theme.card_title;
    if selected {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }

    let mut lines = vec![
        Line::from(Span::styled(movie.name.clone(), title_style)),
        Line::from(Span::styled(
            movie.primary_genre().to_string(),
            theme.genre_style(movie.primary_genre()),
        )),
    ];
    if show_release_dates {
        let year = movie
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| movie.release_date.clone());
        lines.push(Line::from(Span::styled(year, theme.card_release_date)));
    }

    Paragraph::new(lines).render(inner, buf);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
