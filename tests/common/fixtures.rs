//! Feed payload fixtures — JSON envelopes as they come off the wire.
//!
//! The small static payloads pin exact field values; `envelope_json(n)`
//! generates arbitrarily sized envelopes for count and permutation checks.

use marquee_core::Movie;

/// A three-entry envelope with every field populated. Entries are in chart
/// order: Dune, Knives Out, Paddington.
pub const ENVELOPE_THREE: &str = r#"{
    "feed": {
        "title": "Top Movies",
        "country": "us",
        "updated": "2026-08-01T07:30:00.000-07:00",
        "results": [
            {
                "name": "Dune",
                "artworkUrl100": "https://example.com/art/dune.jpg",
                "releaseDate": "2021-10-22",
                "url": "https://example.com/movie/dune",
                "genres": [{"genreId": "18", "name": "Sci-Fi & Fantasy"}]
            },
            {
                "name": "Knives Out",
                "artworkUrl100": "https://example.com/art/knives-out.jpg",
                "releaseDate": "2019-11-27",
                "url": "https://example.com/movie/knives-out",
                "genres": [
                    {"genreId": "4468", "name": "Mystery"},
                    {"genreId": "4426", "name": "Comedy"}
                ]
            },
            {
                "name": "Paddington",
                "artworkUrl100": "https://example.com/art/paddington.jpg",
                "releaseDate": "2015-01-16",
                "url": "https://example.com/movie/paddington",
                "genres": [{"genreId": "4428", "name": "Kids & Family"}]
            }
        ]
    }
}"#;

/// An envelope whose single entry carries no `genres` key at all, as the
/// live feed has been observed to do.
pub const ENVELOPE_NO_GENRES: &str = r#"{
    "feed": {
        "results": [
            {
                "name": "Mystery Film",
                "artworkUrl100": "https://example.com/art/mystery.jpg",
                "releaseDate": "2024-03-01",
                "url": "https://example.com/movie/mystery"
            }
        ]
    }
}"#;

/// Valid JSON that is not the feed envelope shape.
pub const WRONG_SHAPE: &str = r#"{"items": [{"title": "not a feed"}]}"#;

/// Truncated payload. Cut mid-string so it is not valid JSON either.
pub const TRUNCATED: &str = r#"{"feed": {"results": [{"name": "Du"#;

/// Generate an `n`-entry envelope with distinct names in chart order
/// (`"Movie 0"` first).
pub fn envelope_json(n: usize) -> String {
    let results: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "name": format!("Movie {i}"),
                "artworkUrl100": format!("https://example.com/art/{i}.jpg"),
                "releaseDate": format!("{}-06-15", 2000 + (i % 25)),
                "url": format!("https://example.com/movie/{i}"),
                "genres": [{"name": "Action"}]
            })
        })
        .collect();
    serde_json::json!({"feed": {"results": results}}).to_string()
}

/// Names of a movie slice, in order. Most assertions only care about names.
pub fn names(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.name.as_str()).collect()
}
