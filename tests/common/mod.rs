//! Shared test utilities for marquee integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. The fake feed server binds to 127.0.0.1:0 so harnesses
//! can run in parallel without port collisions.

pub mod builders;
pub mod fake_feed_api;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
