//! Core types for marquee.
//!
//! This module defines the fundamental data structures shared across all
//! layers: the decoded [`Movie`] record, its [`Genre`] list, and the
//! [`FeedList`] discriminant.

use serde::Deserialize;

/// One ranked movie from the iTunes feed.
///
/// Fields use the feed's wire names via serde renames; string values are
/// stored exactly as they appear in the payload. A `Movie` is immutable
/// once decoded and compares structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Movie {
    /// Movie title.
    pub name: String,
    /// URL of the 100px artwork image. Never fetched by marquee itself;
    /// surfaced in the detail popup for the user to follow.
    #[serde(rename = "artworkUrl100")]
    pub artwork_url: String,
    /// Release date as received (`YYYY-MM-DD`).
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    /// Detail page URL on the store.
    pub url: String,
    /// Genre list. The feed has been observed to omit it entirely for some
    /// entries, so rendering must go through [`Movie::primary_genre`].
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Movie {
    /// First genre name, or `"Unknown"` when the feed supplied none.
    pub fn primary_genre(&self) -> &str {
        self.genres.first().map(|g| g.name.as_str()).unwrap_or("Unknown")
    }

    /// Release year parsed out of `release_date`, if the field is a valid
    /// `YYYY-MM-DD` date.
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        chrono::NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

/// A single genre tag attached to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Genre {
    pub name: String,
}

/// Which of the two feed lists a value belongs to.
///
/// The two lists come from the same upstream feed family but are fetched and
/// published independently; nothing correlates their contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedList {
    /// The 25-entry list, shuffled into random order before publishing.
    Popular,
    /// The 10-entry list, kept in server order.
    TopTen,
}

impl FeedList {
    /// Entry cap requested from the feed endpoint.
    pub fn limit(self) -> u8 {
        match self {
            FeedList::Popular => 25,
            FeedList::TopTen => 10,
        }
    }
}

impl std::fmt::Display for FeedList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedList::Popular => write!(f, "popular"),
            FeedList::TopTen => write!(f, "top ten"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
