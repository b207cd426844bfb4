//! Paper Execution - In-memory Dry-run Wallet
//!
//! Implements the BetExecution port without touching the site. Stakes are
//! deducted from a simulated balance. The open bet is settled the next
//! time the wallet is used: a coin flip decides it, and a win pays back
//! twice the stake. Only the most recent receipts are kept.

use std::collections::VecDeque;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::bet::Colour;
use crate::ports::execution::{BetExecution, BetReceipt};

/// Receipts retained for inspection.
pub const MAX_BET_HISTORY: usize = 500;

#[derive(Debug)]
struct PaperWallet {
    balance: u64,
    /// Accepted bet waiting for its match to end.
    open: Option<BetReceipt>,
    bets: VecDeque<BetReceipt>,
    rng: StdRng,
}

impl PaperWallet {
    fn settle(&mut self) {
        let Some(bet) = self.open.take() else {
            return;
        };
        if self.rng.gen_bool(0.5) {
            self.balance = self.balance.saturating_add(bet.amount.saturating_mul(2));
            info!(colour = %bet.colour, amount = bet.amount, balance = self.balance, "Paper bet won");
        } else {
            debug!(colour = %bet.colour, amount = bet.amount, "Paper bet lost");
        }
    }

    fn remember(&mut self, receipt: BetReceipt) {
        if self.bets.len() == MAX_BET_HISTORY {
            self.bets.pop_front();
        }
        self.bets.push_back(receipt);
    }
}

/// Dry-run [`BetExecution`] with a simulated balance.
#[derive(Debug)]
pub struct PaperExecution {
    wallet: RwLock<PaperWallet>,
}

impl PaperExecution {
    /// Create a paper wallet holding `starting_balance`.
    pub fn new(starting_balance: u64) -> Self {
        Self::with_rng(starting_balance, StdRng::from_entropy())
    }

    /// Paper wallet whose settlements are reproducible from `seed`.
    pub fn seeded(starting_balance: u64, seed: u64) -> Self {
        Self::with_rng(starting_balance, StdRng::seed_from_u64(seed))
    }

    fn with_rng(starting_balance: u64, rng: StdRng) -> Self {
        Self {
            wallet: RwLock::new(PaperWallet {
                balance: starting_balance,
                open: None,
                bets: VecDeque::new(),
                rng,
            }),
        }
    }

    /// Most recent bets submitted, oldest first, accepted or not.
    pub async fn placed_bets(&self) -> Vec<BetReceipt> {
        self.wallet.read().await.bets.iter().cloned().collect()
    }

    /// Whether an accepted bet is still waiting to settle.
    pub async fn has_open_bet(&self) -> bool {
        self.wallet.read().await.open.is_some()
    }
}

#[async_trait]
impl BetExecution for PaperExecution {
    async fn available_balance(&self) -> anyhow::Result<u64> {
        let mut wallet = self.wallet.write().await;
        wallet.settle();
        Ok(wallet.balance)
    }

    #[instrument(skip(self))]
    async fn place_bet(&self, colour: Colour, amount: u64) -> anyhow::Result<BetReceipt> {
        let mut wallet = self.wallet.write().await;
        wallet.settle();

        let rejection_reason = if amount == 0 {
            Some("stake must be positive".to_string())
        } else if amount > wallet.balance {
            Some(format!("stake {amount} exceeds balance {}", wallet.balance))
        } else {
            None
        };

        if rejection_reason.is_none() {
            wallet.balance -= amount;
            info!(%colour, amount, balance = wallet.balance, "Paper bet placed");
        } else {
            warn!(%colour, amount, reason = ?rejection_reason, "Paper bet rejected");
        }

        let receipt = BetReceipt {
            colour,
            amount,
            accepted: rejection_reason.is_none(),
            rejection_reason,
            balance_after: wallet.balance,
        };
        if receipt.accepted {
            wallet.open = Some(receipt.clone());
        }
        wallet.remember(receipt.clone());
        Ok(receipt)
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bet_deducts_balance() {
        let paper = PaperExecution::seeded(1000, 7);
        let receipt = paper.place_bet(Colour::Blue, 40).await.unwrap();
        assert!(receipt.accepted);
        assert_eq!(receipt.balance_after, 960);
        assert!(paper.has_open_bet().await);
    }

    #[tokio::test]
    async fn test_open_bet_settles_on_next_balance_read() {
        let mut outcomes = Vec::new();
        for seed in 0..32 {
            let paper = PaperExecution::seeded(1000, seed);
            paper.place_bet(Colour::Red, 100).await.unwrap();

            let balance = paper.available_balance().await.unwrap();
            assert!(balance == 900 || balance == 1100, "unexpected balance {balance}");
            assert!(!paper.has_open_bet().await);
            // Settled once only.
            assert_eq!(paper.available_balance().await.unwrap(), balance);
            outcomes.push(balance);
        }
        assert!(outcomes.contains(&900));
        assert!(outcomes.contains(&1100));
    }

    #[tokio::test]
    async fn test_same_seed_settles_the_same_way() {
        let a = PaperExecution::seeded(1000, 99);
        let b = PaperExecution::seeded(1000, 99);
        for _ in 0..5 {
            a.place_bet(Colour::Blue, 10).await.unwrap();
            b.place_bet(Colour::Blue, 10).await.unwrap();
        }
        assert_eq!(
            a.available_balance().await.unwrap(),
            b.available_balance().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_invalid_stakes_are_rejected() {
        let paper = PaperExecution::seeded(10, 1);
        let over = paper.place_bet(Colour::Red, 11).await.unwrap();
        assert!(!over.accepted);
        assert!(over.rejection_reason.unwrap().contains("exceeds"));

        let zero = paper.place_bet(Colour::Red, 0).await.unwrap();
        assert!(!zero.accepted);

        assert!(!paper.has_open_bet().await);
        assert_eq!(paper.available_balance().await.unwrap(), 10);
        assert_eq!(paper.placed_bets().await.len(), 2);
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let paper = PaperExecution::seeded(5, 3);
        for _ in 0..MAX_BET_HISTORY + 20 {
            // Rejected: over balance, so nothing settles and the balance holds.
            paper.place_bet(Colour::Red, 1_000).await.unwrap();
        }
        paper.place_bet(Colour::Blue, 0).await.unwrap();

        let bets = paper.placed_bets().await;
        assert_eq!(bets.len(), MAX_BET_HISTORY);
        assert_eq!(bets.last().unwrap().colour, Colour::Blue);
    }

    #[test]
    fn test_all_in_empties_wallet() {
        let paper = PaperExecution::seeded(250, 5);
        let receipt = tokio_test::block_on(paper.place_bet(Colour::Red, 250)).unwrap();
        assert!(receipt.accepted);
        assert_eq!(receipt.balance_after, 0);
    }
}
