//! Winnings Tracker - Balance Delta Accounting
//!
//! Winnings are not reported by the site; they are inferred from how the
//! balance moves between consecutive decisions. Tournament matches run on
//! a separate bankroll and are skipped. Turning betting off breaks the
//! chain, so the next reading starts fresh instead of counting whatever
//! happened in between.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::fighter::MatchFormat;

/// Accumulated balance changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winnings {
  /// Across every session.
  pub total: i64,
  /// Since the last session reset.
  pub session: i64,
}

/// Tracks winnings from successive balance readings.
#[derive(Debug, Clone, Default)]
pub struct WinningsTracker {
  winnings: Winnings,
  /// Balance at the previous non-tournament decision.
  prev_balance: Option<u64>,
}

fn signed(balance: u64) -> i64 {
  i64::try_from(balance).unwrap_or(i64::MAX)
}

impl WinningsTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Resume with a previously persisted lifetime total.
  pub fn with_total(total: i64) -> Self {
    Self {
      winnings: Winnings { total, session: 0 },
      prev_balance: None,
    }
  }

  /// Record a balance reading taken before deciding on a match.
  ///
  /// Returns the delta credited, if any. The first reading after start
  /// (or after betting was off) only sets the baseline.
  pub fn observe(&mut self, balance: u64, format: MatchFormat) -> Option<i64> {
    if format == MatchFormat::Tournament {
      return None;
    }

    let delta = self
      .prev_balance
      .map(|prev| signed(balance).saturating_sub(signed(prev)));
    if let Some(delta) = delta {
      debug!(delta, "Detected a balance change");
      self.winnings.total = self.winnings.total.saturating_add(delta);
      self.winnings.session = self.winnings.session.saturating_add(delta);
    }
    self.prev_balance = Some(balance);
    delta
  }

  /// Forget the baseline; called while betting is disabled.
  pub fn betting_disabled(&mut self) {
    self.prev_balance = None;
  }

  /// Zero the session figure, keeping the lifetime total.
  pub fn reset_session(&mut self) {
    self.winnings.session = 0;
  }

  pub fn winnings(&self) -> Winnings {
    self.winnings
  }
}
