//! Test builders — ergonomic constructors for [`Movie`] fixtures.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use marquee_core::{Genre, Movie};

// ---------------------------------------------------------------------------
// MovieBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Movie`] test fixtures.
///
/// # Example
///
/// ```rust
/// let movie = MovieBuilder::new("Knives Out")
///     .genre("Mystery")
///     .genre("Comedy")
///     .release_date("2019-11-27")
///     .build();
/// ```
pub struct MovieBuilder {
    name: String,
    artwork_url: String,
    release_date: String,
    url: String,
    genres: Vec<Genre>,
}

impl MovieBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = name.to_lowercase().replace(' ', "-");
        Self {
            artwork_url: format!("https://example.com/art/{slug}.jpg"),
            url: format!("https://example.com/movie/{slug}"),
            release_date: "2024-01-01".to_string(),
            genres: Vec::new(),
            name,
        }
    }

    pub fn genre(mut self, name: impl Into<String>) -> Self {
        self.genres.push(Genre { name: name.into() });
        self
    }

    pub fn release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = date.into();
        self
    }

    pub fn artwork_url(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = url.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn build(self) -> Movie {
        Movie {
            name: self.name,
            artwork_url: self.artwork_url,
            release_date: self.release_date,
            url: self.url,
            genres: self.genres,
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Build a movie with a single genre.
pub fn movie(name: &str, genre: &str) -> Movie {
    MovieBuilder::new(name).genre(genre).build()
}

/// Build a corpus of `n` movies cycling through a small genre set, with
/// distinct names and release years.
pub fn build_corpus(n: usize) -> Vec<Movie> {
    const GENRES: [&str; 4] = ["Action", "Comedy", "Drama", "Documentary"];
    (0..n)
        .map(|i| {
            MovieBuilder::new(format!("Movie {i}"))
                .genre(GENRES[i % GENRES.len()])
                .release_date(format!("{}-06-15", 2000 + (i % 25)))
                .build()
        })
        .collect()
}
