//! marquee-feeds — feed client for the iTunes top-movies endpoint.
//!
//! The client issues one GET per list, decodes the JSON envelope into
//! [`marquee_core::Movie`] records, and publishes the result (or the
//! failure) through the watch channel owned by `marquee-core`.

pub mod client;
pub mod error;

pub use client::{decode, feed_url, fetch, shuffle};
pub use error::FetchError;

use marquee_core::state::FeedPublisher;
use marquee_core::FeedList;
use tokio::sync::mpsc;

/// Spawn the background task that owns one feed list.
///
/// The task fetches once immediately, then refetches every time a unit
/// arrives on `refresh_rx` (queued signals are coalesced into one fetch).
/// Must be called from within a tokio runtime.
pub fn spawn(
    client: reqwest::Client,
    url: String,
    list: FeedList,
    publisher: FeedPublisher,
    mut refresh_rx: mpsc::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        fetch_and_publish(&client, &url, list, &publisher).await;

        while refresh_rx.recv().await.is_some() {
            while refresh_rx.try_recv().is_ok() {}
            publisher.loading();
            fetch_and_publish(&client, &url, list, &publisher).await;
        }
    })
}

/// One fetch-decode-publish cycle. Failures become [`FeedState::Failed`]
/// (via the publisher) rather than propagating.
///
/// [`FeedState::Failed`]: marquee_core::FeedState::Failed
async fn fetch_and_publish(
    client: &reqwest::Client,
    url: &str,
    list: FeedList,
    publisher: &FeedPublisher,
) {
    match client::fetch(client, url).await {
        Ok(mut movies) => {
            if list == FeedList::Popular {
                client::shuffle(&mut movies);
            }
            tracing::debug!(%list, count = movies.len(), "feed fetched");
            publisher.publish(movies);
        }
        Err(err) => {
            tracing::warn!(%list, error = %err, "feed fetch failed");
            publisher.fail(err.to_string());
        }
    }
}
