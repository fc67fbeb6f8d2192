//! Client-side text filter over a published movie list.
//!
//! The filter recomputes synchronously on every keystroke against the full
//! in-memory list; with at most 25 entries there is nothing to debounce or
//! index. Matching is an explicit field predicate (title, genre names,
//! release date) rather than a substring search over some incidental debug
//! serialization, and it is case-insensitive.

use crate::types::Movie;

/// Does `movie` match the free-text `query`?
///
/// An empty query matches every movie. Otherwise the query must appear
/// (case-insensitively) in the title, one of the genre names, or the
/// release date.
pub fn matches(movie: &Movie, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    movie.name.to_lowercase().contains(&needle)
        || movie
            .genres
            .iter()
            .any(|g| g.name.to_lowercase().contains(&needle))
        || movie.release_date.contains(&needle)
}

/// Lazily yield the movies matching `query`, preserving input order.
pub fn filter<'a>(
    movies: &'a [Movie],
    query: &'a str,
) -> impl Iterator<Item = &'a Movie> + 'a {
    movies.iter().filter(move |m| matches(m, query))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
