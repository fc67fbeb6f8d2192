//! Detail popup — centred floating overlay showing one movie's full record.
//!
//! Opened with `Enter` on a grid or rail card; closed with `Enter`, `Escape`
//! or `q`. Artwork is never fetched — the URL is shown so the user can
//! follow it in a browser.

use crate::theme::Theme;
use marquee_core::Movie;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub struct DetailPopup<'a> {
    movie: &'a Movie,
    theme: &'a Theme,
}

impl<'a> DetailPopup<'a> {
    pub fn new(movie: &'a Movie, theme: &'a Theme) -> Self {
        Self { movie, theme }
    }
}

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, 11, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" movie (Esc to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let genres = if self.movie.genres.is_empty() {
            "Unknown".to_string()
        } else {
            self.movie
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let field = |name: &str, value: String, style: Style| {
            Line::from(vec![
                Span::styled(
                    format!("  {name:<10}"),
                    Style::default().add_modifier(Modifier::DIM),
                ),
                Span::styled(value, style),
            ])
        };

        let lines = vec![
            Line::from(Span::styled(
                format!("  {}", self.movie.name),
                self.theme.card_title,
            )),
            Line::default(),
            field("genres", genres, self.theme.card_genre),
            field(
                "released",
                self.movie.release_date.clone(),
                self.theme.card_release_date,
            ),
            field(
                "artwork",
                self.movie.artwork_url.clone(),
                Style::default().add_modifier(Modifier::DIM),
            ),
            field(
                "store",
                self.movie.url.clone(),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
