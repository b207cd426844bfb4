//! Match Feed Port - Current Match Interface
//!
//! Defines the trait for fetching the match currently open for betting,
//! together with both fighters' history, from the match-data backend.

use async_trait::async_trait;

use crate::domain::fighter::MatchData;

/// Trait for match data providers.
///
/// Implementors poll (or are pushed) the match-data backend. Unknown
/// fighters come back as `None` info on the snapshot, not as errors.
#[async_trait]
pub trait MatchFeed: Send + Sync + 'static {
  /// Fetch the match currently open for betting.
  ///
  /// Returns `Ok(None)` when no match is running or bets are closed.
  ///
  /// # Errors
  /// Returns error on transport failure or a malformed payload.
  async fn current_match(&self) -> anyhow::Result<Option<MatchData>>;

  /// Check if the backend is reachable.
  async fn is_healthy(&self) -> bool;
}
