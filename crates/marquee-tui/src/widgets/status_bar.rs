//! Status bar widget — the 1-line strip at the top of the screen.
//!
//! Shows the app name, the storefront country, and one status fragment per
//! feed list; keybinding hints are right-aligned in the same row.

use crate::theme::Theme;
use marquee_core::FeedState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBar<'a> {
    popular: &'a FeedState,
    top_ten: &'a FeedState,
    country: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        popular: &'a FeedState,
        top_ten: &'a FeedState,
        country: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self { popular, top_ten, country, theme }
    }

    fn fragment(&self, label: &str, state: &FeedState) -> Vec<Span<'static>> {
        let (text, style) = match state {
            FeedState::Loading => ("fetching…".to_string(), self.theme.status_loading),
            FeedState::Loaded(movies) => (format!("{}", movies.len()), self.theme.status_loaded),
            FeedState::Failed(_) => ("failed".to_string(), self.theme.status_failed),
        };
        vec![
            Span::styled(
                format!("{label}: "),
                Style::default().add_modifier(Modifier::DIM),
            ),
            Span::styled(text, style),
            Span::raw("  "),
        ]
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" marquee ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("[{}]  ", self.country),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ];
        spans.extend(self.fragment("popular", self.popular));
        spans.extend(self.fragment("top ten", self.top_ten));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        // Keybinding hints at the right edge
        let hint = " /:search  r:refresh  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
