//! Error taxonomy for the feed client.

use thiserror::Error;

/// Everything that can go wrong between issuing the GET and holding a
/// decoded movie list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    /// The body was not a well-formed feed envelope.
    #[error("malformed feed payload: {0}")]
    Decode(#[from] serde_json::Error),
}
