//! Feed endpoint, envelope decoding, and the shuffle applied to the
//! popular list.
//!
//! The wire shape is `{ feed: { results: [ { name, artworkUrl100,
//! releaseDate, url, genres: [{name}] } ] } }`; the envelope types stay
//! private to this module and only the decoded [`Movie`] list escapes.

use crate::error::FetchError;
use marquee_core::Movie;
use rand::seq::SliceRandom;
use serde::Deserialize;

const FEED_BASE: &str = "https://rss.itunes.apple.com/api/v1";

// ---------------------------------------------------------------------------
// Wire envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope {
    feed: Feed,
}

#[derive(Debug, Deserialize)]
struct Feed {
    results: Vec<Movie>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the top-movies feed URL for a storefront country and entry cap.
///
/// No authentication, no query parameters, no pagination.
pub fn feed_url(country: &str, limit: u8) -> String {
    format!("{FEED_BASE}/{country}/movies/top-movies/all/{limit}/explicit.json")
}

/// Decode a raw feed payload into the entry list.
pub fn decode(bytes: &[u8]) -> Result<Vec<Movie>, FetchError> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;
    Ok(envelope.feed.results)
}

/// Issue one GET and decode the response.
///
/// No retry, no timeout override, no cancellation: a transient failure is
/// reported once and the caller decides what to publish.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Vec<Movie>, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    let body = response.bytes().await?;
    decode(&body)
}

/// Shuffle a movie list in place (applied to the popular list before
/// publishing; the top-ten list keeps server order).
pub fn shuffle(movies: &mut [Movie]) {
    movies.shuffle(&mut rand::rng());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
