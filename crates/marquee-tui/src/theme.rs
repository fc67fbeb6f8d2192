//! Colour theme for the marquee TUI.
//!
//! Themes are defined as TOML files. The default theme is embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::load_default`] at startup and pass the result through
//! the application as a shared reference.
//!
//! # Colour assignment for genres
//!
//! Genre names are hashed to a stable index into the palette so the same
//! genre always gets the same colour within a session, regardless of the
//! order in which movies appear.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(ref s) = self.fg {
            if let Some(c) = parse_color(s) {
                style = style.fg(c);
            }
        }
        if let Some(ref s) = self.bg {
            if let Some(c) = parse_color(s) {
                style = style.bg(c);
            }
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawCards {
    title: RawStyle,
    genre: RawStyle,
    release_date: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
    command_bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    loading: RawStyle,
    loaded: RawStyle,
    failed: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawGenres {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    cards: RawCards,
    borders: RawBorders,
    status: RawStatus,
    genres: RawGenres,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// Load once at startup with [`Theme::load_default`] and pass as a shared
/// reference throughout the TUI. All styles are pre-resolved ratatui [`Style`]
/// values — no allocation at render time.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Movie title on a card.
    pub card_title: Style,
    /// Genre line on a card (tinted per genre via [`Theme::genre_style`]).
    pub card_genre: Style,
    /// Release-year line on a card.
    pub card_release_date: Style,

    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,
    /// Border style for the command bar pane.
    pub border_command_bar: Style,

    /// Status-bar indicator while a feed is fetching.
    pub status_loading: Style,
    /// Status-bar indicator for a loaded feed.
    pub status_loaded: Style,
    /// Status-bar indicator for a failed feed.
    pub status_failed: Style,

    /// Ordered colour palette used for genre colour cycling.
    genre_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The default theme is
    /// embedded via `include_str!` and covered by tests, so this should
    /// never happen in practice.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Parse a theme from a TOML string.
    ///
    /// Returns an error if the string cannot be deserialised into a valid
    /// theme. Unknown keys are ignored so user themes can be forward-compatible
    /// with future theme additions.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            card_title: raw.cards.title.into_style(),
            card_genre: raw.cards.genre.into_style(),
            card_release_date: raw.cards.release_date.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            status_loading: raw.status.loading.into_style(),
            status_loaded: raw.status.loaded.into_style(),
            status_failed: raw.status.failed.into_style(),
            genre_palette: raw
                .genres
                .palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    /// Return a stable [`Style`] for a genre name.
    ///
    /// The colour is determined by hashing the name and taking the result
    /// modulo the palette length. The same name always maps to the same colour
    /// within a session, regardless of the order genres appear.
    pub fn genre_style(&self, genre: &str) -> Style {
        if self.genre_palette.is_empty() {
            return self.card_genre;
        }
        let idx = stable_hash(genre) % self.genre_palette.len();
        self.card_genre.fg(self.genre_palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Simple djb2-style hash that is stable across Rust versions and process
/// restarts, making genre colour assignment deterministic.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            s["indexed:".len()..].parse::<u8>().ok().map(Color::Indexed)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
