//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Each loop tick drains the
//! two feed watch channels before drawing, so a fetch that completes while
//! the user is typing shows up on the next frame.

use crate::{
    commands::Command,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        detail::DetailPopup,
        grid::{GridState, MovieGrid},
        help::HelpPopup,
        rail::{self, RailState, TopTenRail},
        search_bar::{SearchBar, SearchBarState},
        status_bar::StatusBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use marquee_core::{config::Config, filter, FeedState, Movie};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::{mpsc, watch};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Rail,
    Grid,
    SearchBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// Feed handles
// ---------------------------------------------------------------------------

/// Read side of the two feed channels plus the refresh triggers, handed to
/// the App by [`crate::run`].
pub struct FeedHandles {
    pub popular_rx: watch::Receiver<FeedState>,
    pub top_rx: watch::Receiver<FeedState>,
    pub refresh_popular: mpsc::Sender<()>,
    pub refresh_top: mpsc::Sender<()>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    /// Latest snapshot of the popular feed (already shuffled by the feed task).
    pub popular: FeedState,
    /// Latest snapshot of the top-ten feed (server order).
    pub top_ten: FeedState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    /// Movie shown in the detail popup, if open.
    pub detail: Option<Movie>,
    pub search: SearchBarState,
    pub grid: GridState,
    pub rail: RailState,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    feeds: FeedHandles,
}

impl App {
    pub fn new(config: Config, theme: Theme, feeds: FeedHandles) -> Self {
        let grid = GridState::new(config.ui.grid_columns, config.ui.show_release_dates);

        let state = AppState {
            popular: FeedState::Loading,
            top_ten: FeedState::Loading,
            focus: Focus::Grid,
            prev_focus: Focus::Grid,
            theme,
            config,
            show_help: false,
            detail: None,
            search: SearchBarState::default(),
            grid,
            rail: RailState::new(),
            command_bar: CommandBarState::default(),
            quit: false,
        };

        App { state, feeds }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.sync_feeds();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Pull the latest snapshots out of the feed channels, reapplying the
    /// filter when something changed.
    fn sync_feeds(&mut self) {
        let mut changed = false;

        if self.feeds.popular_rx.has_changed().unwrap_or(false) {
            self.state.popular = self.feeds.popular_rx.borrow_and_update().clone();
            changed = true;
        }
        if self.feeds.top_rx.has_changed().unwrap_or(false) {
            self.state.top_ten = self.feeds.top_rx.borrow_and_update().clone();
            changed = true;
        }

        if changed {
            tracing::debug!("feed snapshot updated");
            apply_filter(&mut self.state);
        }
    }

    /// Nudge both fetch tasks to refetch. A full refresh channel means a
    /// refetch is already queued, so dropped sends are fine.
    fn request_refresh(&mut self) {
        tracing::debug!("refresh requested");
        let _ = self.feeds.refresh_popular.try_send(());
        let _ = self.feeds.refresh_top.try_send(());
    }

    fn handle(&mut self, event: AppEvent) {
        // Popups intercept all events; only close keys pass through.
        if self.state.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.state.show_help = false;
                }
                _ => {}
            }
            return;
        }
        if self.state.detail.is_some() {
            match event {
                AppEvent::Escape | AppEvent::Enter | AppEvent::Quit => {
                    tracing::debug!("detail popup closed");
                    self.state.detail = None;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.state.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.state.command_bar.clear();
                    self.state.focus = self.state.prev_focus;
                }
                AppEvent::Enter => {
                    let input = self.state.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            self.state.command_bar.clear();
                            self.state.focus = self.state.prev_focus;
                            self.execute_command(cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input — just close
                            self.state.command_bar.clear();
                            self.state.focus = self.state.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            self.state.command_bar.error = Some(msg);
                        }
                    }
                }
                other => self.state.command_bar.handle(&other),
            }
            return;
        }

        if event == AppEvent::Refresh {
            self.request_refresh();
            return;
        }

        let s = &mut self.state;
        match event {
            // Toggle help (only when not typing in the search bar)
            AppEvent::Char('?') if s.focus != Focus::SearchBar => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            // Enter command mode with `:` (not from the search bar)
            AppEvent::Char(':') if s.focus != Focus::SearchBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            // Return focus from the search bar, keeping the query
            AppEvent::Escape => {
                if s.focus == Focus::SearchBar {
                    tracing::debug!("focus: SearchBar -> Grid");
                    s.focus = Focus::Grid;
                }
            }

            // Tab-cycle focus: Rail → Grid → SearchBar → Rail
            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::Rail => Focus::Grid,
                    Focus::Grid => Focus::SearchBar,
                    Focus::SearchBar | Focus::Command => Focus::Rail,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            // Jump to the search bar
            AppEvent::SearchFocus => {
                tracing::debug!("focus -> SearchBar");
                s.focus = Focus::SearchBar;
            }

            // Open the detail popup on the selected card
            AppEvent::Enter if s.focus == Focus::Grid => {
                if let Some(movie) = s.grid.selected() {
                    tracing::debug!(movie = %movie.name, "detail popup opened");
                    s.detail = Some(movie.clone());
                }
            }
            AppEvent::Enter if s.focus == Focus::Rail => {
                if let Some(movie) = s.rail.selected() {
                    tracing::debug!(movie = %movie.name, "detail popup opened");
                    s.detail = Some(movie.clone());
                }
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }

    /// Execute a parsed [`Command`] against the application state.
    fn execute_command(&mut self, cmd: Command) {
        if cmd == Command::Refresh {
            self.request_refresh();
            return;
        }

        let s = &mut self.state;
        match cmd {
            Command::Quit => {
                s.quit = true;
            }
            Command::Help => {
                s.show_help = !s.show_help;
            }
            Command::Theme(name) => {
                s.theme = match name.to_ascii_lowercase().as_str() {
                    "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Theme::load_gruvbox_dark(),
                    _ => Theme::load_default(),
                };
            }
            Command::Refresh => {} // handled above, should not reach here
            Command::Dates => {
                s.grid.show_release_dates = !s.grid.show_release_dates;
            }
            Command::Columns(n) => {
                s.grid.columns = n;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::SearchBar | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Rail => s.rail.handle(&event),
        Focus::Grid => s.grid.handle(&event),
        Focus::SearchBar => {
            if s.search.handle(&event) {
                apply_filter(s);
            }
        }
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

/// Recompute both widget lists from the latest snapshots and the query.
///
/// Runs synchronously on every edit; both lists together hold at most 35
/// entries. Rail entries keep their 1-based server rank across filtering.
pub(crate) fn apply_filter(s: &mut AppState) {
    let query = &s.search.query;

    s.grid
        .set_movies(filter::filter(s.popular.movies(), query).cloned().collect());

    s.rail.set_movies(
        s.top_ten
            .movies()
            .iter()
            .enumerate()
            .filter(|(_, m)| filter::matches(m, query))
            .map(|(i, m)| (i + 1, m.clone()))
            .collect(),
    );
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | top-ten rail | grid | 3-line search bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(rail::HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(
        StatusBar::new(
            &state.popular,
            &state.top_ten,
            &state.config.feed.country,
            &state.theme,
        ),
        vert[0],
    );
    frame.render_widget(
        TopTenRail::new(
            &state.rail,
            &state.top_ten,
            state.focus == Focus::Rail,
            &state.theme,
        ),
        vert[1],
    );
    frame.render_widget(
        MovieGrid::new(
            &state.grid,
            &state.popular,
            state.focus == Focus::Grid,
            &state.theme,
        ),
        vert[2],
    );

    let shown = state.grid.movies.len() + state.rail.movies.len();
    let total = state.popular.movies().len() + state.top_ten.movies().len();
    frame.render_widget(
        SearchBar::new(
            &state.search,
            shown,
            total,
            state.focus == Focus::SearchBar,
            &state.theme,
        ),
        vert[3],
    );

    if let Some(ref movie) = state.detail {
        frame.render_widget(DetailPopup::new(movie, &state.theme), area);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return; // cursor is set; skip search-bar cursor below
    }

    // Position the terminal cursor when the search bar is focused
    if state.focus == Focus::SearchBar {
        let sb = SearchBar::new(&state.search, shown, total, true, &state.theme);
        let (cx, cy) = sb.cursor_position(vert[3]);
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{Genre, Movie};
    use pretty_assertions::assert_eq;

    fn movie(name: &str, genre: &str) -> Movie {
        Movie {
            name: name.to_string(),
            artwork_url: String::new(),
            release_date: "2020-01-01".to_string(),
            url: String::new(),
            genres: vec![Genre { name: genre.to_string() }],
        }
    }

    fn test_app() -> App {
        let (_pop_pub, popular_rx) = marquee_core::state::channel();
        let (_top_pub, top_rx) = marquee_core::state::channel();
        let (refresh_popular, _pop_refresh) = mpsc::channel(1);
        let (refresh_top, _top_refresh) = mpsc::channel(1);
        App::new(
            Config::defaults(),
            Theme::load_default(),
            FeedHandles { popular_rx, top_rx, refresh_popular, refresh_top },
        )
    }

    fn load(app: &mut App, popular: Vec<Movie>, top: Vec<Movie>) {
        app.state_mut().popular = FeedState::Loaded(popular);
        app.state_mut().top_ten = FeedState::Loaded(top);
        apply_filter(app.state_mut());
    }

    #[test]
    fn focus_cycles_through_panes() {
        let mut app = test_app();
        assert_eq!(app.state().focus, Focus::Grid);
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state().focus, Focus::SearchBar);
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state().focus, Focus::Rail);
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state().focus, Focus::Grid);
    }

    #[test]
    fn typing_in_search_filters_both_lists() {
        let mut app = test_app();
        load(
            &mut app,
            vec![movie("Alpha", "Action"), movie("Beta", "Comedy")],
            vec![movie("Gamma", "Comedy"), movie("Delta", "Action")],
        );
        assert_eq!(app.state().grid.movies.len(), 2);

        app.handle(AppEvent::SearchFocus);
        for c in "Comedy".chars() {
            app.handle(AppEvent::Char(c));
        }

        assert_eq!(app.state().grid.movies.len(), 1);
        assert_eq!(app.state().grid.movies[0].name, "Beta");
        assert_eq!(app.state().rail.movies.len(), 1);
        assert_eq!(app.state().rail.movies[0].1.name, "Gamma");
        // Gamma was the first chart entry, so its rank is preserved
        assert_eq!(app.state().rail.movies[0].0, 1);
    }

    #[test]
    fn escape_leaves_search_but_keeps_query() {
        let mut app = test_app();
        load(&mut app, vec![movie("Alpha", "Action")], vec![]);
        app.handle(AppEvent::SearchFocus);
        app.handle(AppEvent::Char('x'));
        app.handle(AppEvent::Escape);
        assert_eq!(app.state().focus, Focus::Grid);
        assert_eq!(app.state().search.query, "x");
    }

    #[test]
    fn clearing_the_query_restores_both_lists() {
        let mut app = test_app();
        load(
            &mut app,
            vec![movie("Alpha", "Action"), movie("Beta", "Comedy")],
            vec![movie("Gamma", "Comedy")],
        );
        app.handle(AppEvent::SearchFocus);
        app.handle(AppEvent::Char('z'));
        assert!(app.state().grid.movies.is_empty());
        assert!(app.state().rail.movies.is_empty());

        app.handle(AppEvent::ClearInput);
        assert_eq!(app.state().search.query, "");
        assert_eq!(app.state().grid.movies.len(), 2);
        assert_eq!(app.state().rail.movies.len(), 1);
        assert_eq!(app.state().focus, Focus::SearchBar);
    }

    #[test]
    fn enter_on_grid_opens_detail_popup() {
        let mut app = test_app();
        load(&mut app, vec![movie("Alpha", "Action")], vec![]);
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().detail.as_ref().unwrap().name, "Alpha");
        // Any close key dismisses it
        app.handle(AppEvent::Escape);
        assert!(app.state().detail.is_none());
    }

    #[test]
    fn quit_key_sets_quit_flag() {
        let mut app = test_app();
        app.handle(AppEvent::Quit);
        assert!(app.state().quit);
    }

    #[test]
    fn q_closes_help_without_quitting() {
        let mut app = test_app();
        app.handle(AppEvent::Char('?'));
        assert!(app.state().show_help);
        app.handle(AppEvent::Quit);
        assert!(!app.state().show_help);
        assert!(!app.state().quit);
    }

    #[test]
    fn command_columns_updates_grid() {
        let mut app = test_app();
        app.handle(AppEvent::Char(':'));
        assert_eq!(app.state().focus, Focus::Command);
        for c in "columns 5".chars() {
            app.handle(AppEvent::Char(c));
        }
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().grid.columns, 5);
        assert_eq!(app.state().focus, Focus::Grid);
    }

    #[test]
    fn unknown_command_shows_error_and_stays_open() {
        let mut app = test_app();
        app.handle(AppEvent::Char(':'));
        app.handle(AppEvent::Char('z'));
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().focus, Focus::Command);
        assert!(app.state().command_bar.error.is_some());
    }

    #[test]
    fn feed_update_reapplies_active_filter() {
        let mut app = test_app();
        load(&mut app, vec![movie("Alpha", "Action")], vec![]);
        app.handle(AppEvent::SearchFocus);
        app.handle(AppEvent::Char('z'));
        assert!(app.state().grid.movies.is_empty());

        // A later snapshot arrives while the filter is active
        app.state_mut().popular =
            FeedState::Loaded(vec![movie("Zulu", "Action"), movie("Alpha", "Action")]);
        apply_filter(app.state_mut());
        assert_eq!(app.state().grid.movies.len(), 1);
        assert_eq!(app.state().grid.movies[0].name, "Zulu");
    }
}
