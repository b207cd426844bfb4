//! Decision Journal Port - Decision Persistence Interface
//!
//! Every decision the engine makes is appended to a journal so the last
//! known decision survives restarts and can be shown to the user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::bet::{BetData, Wager};
use crate::domain::fighter::{MatchFormat, Tier};
use crate::domain::odds::MatchupOdds;
use crate::domain::wager::SizingRule;

/// One persisted decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
  /// Red corner name.
  pub fighter_red: String,
  /// Blue corner name.
  pub fighter_blue: String,
  pub match_format: MatchFormat,
  pub tier: Option<Tier>,
  /// Bet mode name as configured.
  pub bet_mode: String,
  /// Recommendation after upset inversion.
  pub bet_data: BetData,
  /// Stake, or `""` when not betting.
  pub wager: Wager,
  /// Sizing rule label.
  pub rule: String,
  /// Win-count odds, red first.
  #[serde(default)]
  pub odds: Option<MatchupOdds>,
  /// Balance read before deciding.
  pub balance: u64,
  /// Lifetime winnings at decision time.
  #[serde(default)]
  pub total_winnings: i64,
  /// Session winnings at decision time.
  #[serde(default)]
  pub session_winnings: i64,
  /// Timestamp (Unix ms).
  pub timestamp_ms: u64,
}

impl DecisionRecord {
  /// Whether the sizing rule recorded here matches `rule`.
  pub fn was_sized_by(&self, rule: SizingRule) -> bool {
    self.rule == rule.as_str()
  }
}

/// Trait for decision persistence providers.
#[async_trait]
pub trait DecisionJournal: Send + Sync + 'static {
  /// Append a decision.
  async fn record(&self, record: &DecisionRecord) -> anyhow::Result<()>;

  /// Most recent decision, if any was ever recorded.
  async fn latest(&self) -> anyhow::Result<Option<DecisionRecord>>;

  /// Check if the journal is writable.
  async fn is_healthy(&self) -> bool;
}
