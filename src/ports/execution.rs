//! Bet Execution Port - Wallet and Bet Placement Interface
//!
//! Defines the trait for reading the account balance and submitting a
//! wager on one corner. Paper and live implementations live in adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::bet::Colour;

/// Result of a bet placement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetReceipt {
  /// Corner the stake went on.
  pub colour: Colour,
  /// Amount staked.
  pub amount: u64,
  /// Whether the bet was accepted.
  pub accepted: bool,
  /// Rejection reason if not accepted.
  pub rejection_reason: Option<String>,
  /// Balance remaining after the stake was taken.
  pub balance_after: u64,
}

/// Trait for bet execution providers.
#[async_trait]
pub trait BetExecution: Send + Sync + 'static {
  /// Current account balance, in whole currency units.
  async fn available_balance(&self) -> anyhow::Result<u64>;

  /// Stake `amount` on `colour` for the open match.
  ///
  /// A rejected bet is reported through [`BetReceipt::accepted`]; `Err`
  /// is reserved for transport failures.
  async fn place_bet(&self, colour: Colour, amount: u64) -> anyhow::Result<BetReceipt>;

  /// Check if the execution backend is usable.
  async fn is_healthy(&self) -> bool;
}
