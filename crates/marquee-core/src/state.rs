//! Published feed state — the single source of truth the UI reads from.
//!
//! Each feed list has exactly one producer (its fetch task) and any number
//! of readers. State flows through a tokio watch channel, so readers only
//! ever observe the latest snapshot; intermediate states may be skipped but
//! never interleaved.
//!
//! Fetch failures are published as [`FeedState::Failed`] rather than being
//! swallowed, so the rendering layer can show an explicit error state.

use crate::types::Movie;
use tokio::sync::watch;

/// Lifecycle of one published feed list.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    /// A fetch is in flight and nothing has been published yet (or a
    /// refresh is replacing the previous list).
    Loading,
    /// The most recently decoded entry list.
    Loaded(Vec<Movie>),
    /// The last fetch failed; the message is human-readable.
    Failed(String),
}

impl FeedState {
    /// The loaded movies, or an empty slice while loading or failed.
    pub fn movies(&self) -> &[Movie] {
        match self {
            FeedState::Loaded(movies) => movies,
            _ => &[],
        }
    }
}

/// Create a watch channel for one feed list, starting in [`FeedState::Loading`].
pub fn channel() -> (FeedPublisher, watch::Receiver<FeedState>) {
    let (tx, rx) = watch::channel(FeedState::Loading);
    (FeedPublisher { tx }, rx)
}

/// Write half of a feed-state channel.
///
/// Single-producer contract: exactly one `FeedPublisher` exists per list,
/// owned by that list's fetch task. Publishing never blocks and succeeds
/// even with no readers attached.
#[derive(Debug)]
pub struct FeedPublisher {
    tx: watch::Sender<FeedState>,
}

impl FeedPublisher {
    /// Publish a decoded entry list.
    pub fn publish(&self, movies: Vec<Movie>) {
        tracing::debug!(count = movies.len(), "publishing loaded feed");
        let _ = self.tx.send(FeedState::Loaded(movies));
    }

    /// Publish a fetch failure.
    pub fn fail(&self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(%reason, "publishing failed feed");
        let _ = self.tx.send(FeedState::Failed(reason));
    }

    /// Reset to the loading state (start of a refresh).
    pub fn loading(&self) {
        let _ = self.tx.send(FeedState::Loading);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
