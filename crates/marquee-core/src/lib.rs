//! marquee-core — core library for marquee.
//!
//! This crate holds everything shared between the feed layer and the UI:
//! the decoded [`Movie`] record, the published feed state, the client-side
//! filter, and configuration loading.
//!
//! # Architecture
//!
//! ```text
//! Feed client ──► Published state ──► Filter ──► UI
//! ```
//!
//! The feed client publishes into a tokio watch channel; the UI reads the
//! latest snapshot and applies the filter on every keystroke.

pub mod config;
pub mod filter;
pub mod state;
pub mod types;

pub use state::FeedState;
pub use types::{FeedList, Genre, Movie};
