//! Top-ten rail widget — the fixed-height horizontal strip above the grid.
//!
//! Cards carry their server-order rank (`#1`…`#10`); ranks survive
//! filtering, so a filtered rail still shows each movie's true chart
//! position.
//!
//! # Navigation (when pane is focused)
//!
//! `←` / `h` and `→` / `l` move the cursor; `G` jumps to the last card.
//! The cursor is always kept within the visible window.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use marquee_core::{FeedState, Movie};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Card width in terminal columns, borders included.
const CARD_WIDTH: u16 = 24;

/// Total widget height: 2 outer borders + 2 card borders + 3 content rows.
pub const HEIGHT: u16 = 7;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct RailState {
    /// `(rank, movie)` pairs; rank is the 1-based server-order position.
    pub movies: Vec<(usize, Movie)>,
    /// Index into `movies` of the highlighted card.
    pub cursor: usize,
    /// Index of the first visible card.
    pub scroll: usize,
    /// Cached from the last render so `handle()` can do cursor-aware scrolling.
    last_cols: Cell<usize>,
}

impl RailState {
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            cursor: 0,
            scroll: 0,
            last_cols: Cell::new(4),
        }
    }

    /// Replace the visible list, keeping the cursor in bounds.
    pub fn set_movies(&mut self, movies: Vec<(usize, Movie)>) {
        self.movies = movies;
        self.cursor = self.cursor.min(self.movies.len().saturating_sub(1));
        self.ensure_cursor_visible();
    }

    /// The movie under the cursor, if any.
    pub fn selected(&self) -> Option<&Movie> {
        self.movies.get(self.cursor).map(|(_, m)| m)
    }

    fn visible_cols(&self) -> usize {
        self.last_cols.get().max(1)
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
                tracing::debug!(cursor = self.cursor, "rail: cursor left");
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor + 1 < total {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "rail: cursor right");
            }
            AppEvent::ScrollToEnd => {
                self.cursor = total - 1;
                tracing::debug!(cursor = self.cursor, "rail: jump to end");
            }
            _ => {}
        }

        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.visible_cols() {
            self.scroll = self.cursor + 1 - self.visible_cols();
        }
    }
}

impl Default for RailState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct TopTenRail<'a> {
    state: &'a RailState,
    status: &'a FeedState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> TopTenRail<'a> {
    pub fn new(
        state: &'a RailState,
        status: &'a FeedState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, status, focused, theme }
    }
}

impl Widget for TopTenRail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Top Ten")
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

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

        let cols_visible = (inner.width / CARD_WIDTH).max(1) as usize;
        self.state.last_cols.set(cols_visible);

        let first = self.state.scroll.min(self.state.movies.len().saturating_sub(1));
        let last = (first + cols_visible).min(self.state.movies.len());

        for (slot, idx) in (first..last).enumerate() {
            let (rank, movie) = &self.state.movies[idx];
            let card_area = Rect {
                x: inner.x + (slot as u16) * CARD_WIDTH,
                width: CARD_WIDTH.min(inner.right().saturating_sub(inner.x + (slot as u16) * CARD_WIDTH)),
                ..inner
            };
            let selected = self.focused && idx == self.state.cursor;
            render_card(*rank, movie, selected, self.theme, card_area, buf);
        }
    }
}

fn render_card(
    rank: usize,
    movie: &Movie,
    selected: bool,
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

    let lines = vec![
        Line::from(Span::styled(
            format!("#{rank}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(movie.name.clone(), title_style)),
        Line::from(Span::styled(
            movie.primary_genre().to_string(),
            theme.genre_style(movie.primary_genre()),
        )),
    ];

    Paragraph::new(lines).render(inner, buf);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
