//! Match Data API Adapter
//!
//! Implements the HTTP client for the read-only match-data backend and
//! the `MatchFeed` port on top of it.
//!
//! Sub-modules:
//! - `client`: HTTP client with timeouts and retries
//! - `current_match`: Current match polling (`MatchFeed`)

pub mod client;
pub mod current_match;

pub use client::{ApiClient, ApiClientConfig};
pub use current_match::CurrentMatchFeed;
