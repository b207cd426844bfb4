//! Betting Loop - Polling Cycle Around the Decision Engine
//!
//! Each tick:
//! 1. Fetches the current match (skips if none, or already decided)
//! 2. Loads bet settings and reads the balance
//! 3. Credits winnings from the balance change
//! 4. Decides colour and stake
//! 5. Journals the decision and places the bet
//!
//! Collaborator failures abort the cycle; the match is retried on the
//! next tick because it is only marked decided once the cycle completes.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use crate::adapters::metrics::{HealthState, MetricsRegistry};
use crate::domain::fighter::{MatchData, MatchKey};
use crate::domain::odds::matchup_odds;
use crate::domain::settings::BetSettings;
use crate::ports::execution::{BetExecution, BetReceipt};
use crate::ports::journal::{DecisionJournal, DecisionRecord};
use crate::ports::match_feed::MatchFeed;
use crate::ports::settings_store::SettingsStore;

use super::decision::{Decision, DecisionEngine};
use super::winnings::{Winnings, WinningsTracker};

/// What one cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
  /// No match is open.
  NoMatch,
  /// The open match was decided on an earlier tick.
  AlreadyDecided,
  /// Settings name an unknown bet mode; nothing was decided.
  InvalidBetMode(String),
  /// A decision was made, and the bet placed if it had a stake.
  Decided {
    decision: Decision,
    receipt: Option<BetReceipt>,
  },
}

/// Holds the readiness flag up while the loop runs; clears it on exit,
/// including when the task unwinds.
struct RunningFlag(Option<Arc<HealthState>>);

impl RunningFlag {
  fn raise(health: Option<Arc<HealthState>>) -> Self {
    if let Some(health) = &health {
      health.set_loop_running(true);
    }
    Self(health)
  }
}

impl Drop for RunningFlag {
  fn drop(&mut self) {
    if let Some(health) = &self.0 {
      health.set_loop_running(false);
    }
  }
}

/// Drives the decision engine once per announced match.
pub struct BettingLoop<F: MatchFeed, E: BetExecution, S: SettingsStore, J: DecisionJournal> {
  /// Current match source.
  feed: Arc<F>,
  /// Balance reader and bet placement.
  execution: Arc<E>,
  /// User bet policy.
  settings: Arc<S>,
  /// Decision persistence.
  journal: Arc<J>,
  /// Strategy selection and sizing.
  engine: DecisionEngine,
  /// Balance-delta accounting.
  winnings: WinningsTracker,
  /// Match decided most recently.
  last_key: Option<MatchKey>,
  /// Delay between cycles.
  interval: Duration,
  metrics: Option<Arc<MetricsRegistry>>,
  health: Option<Arc<HealthState>>,
}

impl<F: MatchFeed, E: BetExecution, S: SettingsStore, J: DecisionJournal> BettingLoop<F, E, S, J> {
  /// Create a new betting loop.
  pub fn new(
    feed: Arc<F>,
    execution: Arc<E>,
    settings: Arc<S>,
    journal: Arc<J>,
    engine: DecisionEngine,
    interval: Duration,
  ) -> Self {
    Self {
      feed,
      execution,
      settings,
      journal,
      engine,
      winnings: WinningsTracker::new(),
      last_key: None,
      interval,
      metrics: None,
      health: None,
    }
  }

  /// Resume winnings accounting from an earlier run.
  pub fn with_winnings(mut self, winnings: WinningsTracker) -> Self {
    self.winnings = winnings;
    self
  }

  pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
    self.metrics = Some(metrics);
    self
  }

  pub fn with_health(mut self, health: Arc<HealthState>) -> Self {
    self.health = Some(health);
    self
  }

  /// Run cycles every `interval` until shutdown.
  #[instrument(skip(self, shutdown_rx), name = "betting_loop")]
  pub async fn run(&mut self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
    info!(interval_ms = self.interval.as_millis(), "Starting betting loop");

    let mut ticker = tokio::time::interval(self.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let _running = RunningFlag::raise(self.health.clone());

    loop {
      tokio::select! {
        biased;
        _ = shutdown_rx.recv() => {
          info!("Shutdown signal received, stopping betting loop");
          break;
        }
        _ = ticker.tick() => {
          match self.run_cycle().await {
            Ok(outcome) => debug!(?outcome, "Cycle finished"),
            Err(e) => warn!(error = %e, "Betting cycle failed, retrying next tick"),
          }
        }
      }
    }

    Ok(())
  }

  /// Run a single polling cycle.
  ///
  /// # Errors
  /// Returns error when the feed, settings store, balance reader or bet
  /// placement fails. Journal failures are logged and do not abort.
  pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
    let fetched = self.feed.current_match().await;
    if let Some(health) = &self.health {
      health.set_feed_healthy(fetched.is_ok());
    }
    let Some(match_data) = fetched.context("Failed to fetch current match")? else {
      return Ok(CycleOutcome::NoMatch);
    };

    let key = match_data.key();
    if self.last_key.as_ref() == Some(&key) {
      return Ok(CycleOutcome::AlreadyDecided);
    }

    let settings = self.settings.load().await.context("Failed to load bet settings")?;
    let balance = self
      .execution
      .available_balance()
      .await
      .context("Failed to read balance")?;
    if let Some(metrics) = &self.metrics {
      metrics.set_balance(balance);
    }

    if settings.enable_betting {
      self.winnings.observe(balance, match_data.match_format);
    } else {
      self.winnings.betting_disabled();
    }

    let decision = match self.engine.decide(&match_data, &settings, balance) {
      Ok(decision) => decision,
      Err(e) => {
        if let Some(metrics) = &self.metrics {
          metrics.invalid_bet_mode.inc();
        }
        return Ok(CycleOutcome::InvalidBetMode(e.to_string()));
      }
    };

    info!(
      red = %match_data.fighter_red,
      blue = %match_data.fighter_blue,
      bet_mode = %decision.bet_mode,
      colour = %decision.bet_data.colour,
      confidence = ?decision.bet_data.confidence,
      wager = %decision.wager,
      rule = %decision.rule,
      "Match decided"
    );

    let record = self.record(&match_data, &settings, &decision, balance);
    if let Err(e) = self.journal.record(&record).await {
      warn!(error = %e, "Failed to journal decision");
    }

    let receipt = match decision.wager.amount().filter(|&amount| amount > 0) {
      Some(amount) => Some(self.place(&decision, amount).await?),
      None => {
        if let Some(metrics) = &self.metrics {
          metrics.record_no_bet(decision.rule);
        }
        None
      }
    };

    if let Some(metrics) = &self.metrics {
      metrics.record_decision(decision.bet_mode);
      metrics.set_session_winnings(self.winnings.winnings().session);
    }

    self.last_key = Some(key);
    Ok(CycleOutcome::Decided { decision, receipt })
  }

  async fn place(&self, decision: &Decision, amount: u64) -> Result<BetReceipt> {
    let colour = decision.bet_data.colour;
    let receipt = self
      .execution
      .place_bet(colour, amount)
      .await
      .context("Failed to place bet")?;

    if receipt.accepted {
      if let Some(metrics) = &self.metrics {
        metrics.record_wager(colour, amount);
        metrics.set_balance(receipt.balance_after);
      }
    } else {
      warn!(
        colour = %colour,
        amount,
        reason = receipt.rejection_reason.as_deref().unwrap_or("unknown"),
        "Bet rejected"
      );
    }
    Ok(receipt)
  }

  fn record(
    &self,
    match_data: &MatchData,
    settings: &BetSettings,
    decision: &Decision,
    balance: u64,
  ) -> DecisionRecord {
    let winnings = self.winnings.winnings();
    DecisionRecord {
      fighter_red: match_data.fighter_red.clone(),
      fighter_blue: match_data.fighter_blue.clone(),
      match_format: match_data.match_format,
      tier: match_data.tier,
      bet_mode: settings.bet_mode.clone(),
      bet_data: decision.bet_data,
      wager: decision.wager,
      rule: decision.rule.to_string(),
      odds: Some(matchup_odds(
        match_data.fighter_red_info.as_ref(),
        match_data.fighter_blue_info.as_ref(),
      )),
      balance,
      total_winnings: winnings.total,
      session_winnings: winnings.session,
      timestamp_ms: u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default(),
    }
  }

  /// Accumulated winnings.
  pub fn winnings(&self) -> Winnings {
    self.winnings.winnings()
  }

  /// Most recent successful decision.
  pub fn last_decision(&self) -> Option<&Decision> {
    self.engine.last_decision()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex;

  use async_trait::async_trait;

  use crate::adapters::execution::PaperExecution;
  use crate::domain::bet::{Colour, Wager};
  use crate::domain::fighter::{FighterInfo, FighterStats, MatchFormat, MatchRecord, Tier};
  use crate::domain::odds::Favourite;
  use crate::domain::wager::SizingRule;

  struct FixedFeed(Option<MatchData>);

  #[async_trait]
  impl MatchFeed for FixedFeed {
    async fn current_match(&self) -> Result<Option<MatchData>> {
      Ok(self.0.clone())
    }

    async fn is_healthy(&self) -> bool {
      true
    }
  }

  struct FixedSettings(BetSettings);

  #[async_trait]
  impl SettingsStore for FixedSettings {
    async fn load(&self) -> Result<BetSettings> {
      Ok(self.0.clone())
    }
  }

  struct BrokenFeed;

  #[async_trait]
  impl MatchFeed for BrokenFeed {
    async fn current_match(&self) -> Result<Option<MatchData>> {
      panic!("feed exploded");
    }

    async fn is_healthy(&self) -> bool {
      true
    }
  }

  #[derive(Default)]
  struct MemoryJournal(Mutex<Vec<DecisionRecord>>);

  #[async_trait]
  impl DecisionJournal for MemoryJournal {
    async fn record(&self, record: &DecisionRecord) -> Result<()> {
      self.0.lock().unwrap().push(record.clone());
      Ok(())
    }

    async fn latest(&self) -> Result<Option<DecisionRecord>> {
      Ok(self.0.lock().unwrap().last().cloned())
    }

    async fn is_healthy(&self) -> bool {
      true
    }
  }

  fn fighter(id: i64, elo: f64) -> FighterInfo {
    FighterInfo {
      id,
      elo,
      tier_elo: elo,
      average_bet_override: None,
      stats: FighterStats::default(),
      matches: Vec::new(),
    }
  }

  fn matchup() -> MatchData {
    MatchData {
      fighter_red: "Red".into(),
      fighter_blue: "Blue".into(),
      fighter_red_info: Some(fighter(1, 1900.0)),
      fighter_blue_info: Some(fighter(2, 1500.0)),
      match_format: MatchFormat::Matchmaking,
      tier: Some(Tier::B),
    }
  }

  fn betting_loop(
    feed: FixedFeed,
    settings: BetSettings,
  ) -> BettingLoop<FixedFeed, PaperExecution, FixedSettings, MemoryJournal> {
    BettingLoop::new(
      Arc::new(feed),
      Arc::new(PaperExecution::new(1100)),
      Arc::new(FixedSettings(settings)),
      Arc::new(MemoryJournal::default()),
      DecisionEngine::seeded(1),
      Duration::from_millis(10),
    )
  }

  fn elo_settings() -> BetSettings {
    BetSettings {
      bet_mode: "elo".to_string(),
      ..BetSettings::default()
    }
  }

  #[tokio::test]
  async fn test_decides_each_match_once() {
    let mut bot = betting_loop(FixedFeed(Some(matchup())), elo_settings());

    let CycleOutcome::Decided { decision, receipt } = bot.run_cycle().await.unwrap() else {
      panic!("expected a decision");
    };
    assert_eq!(decision.bet_data.colour, Colour::Red);
    assert_eq!(decision.wager, Wager::Amount(50));
    let receipt = receipt.unwrap();
    assert!(receipt.accepted);
    assert_eq!(receipt.balance_after, 1050);

    assert_eq!(bot.run_cycle().await.unwrap(), CycleOutcome::AlreadyDecided);
    assert_eq!(bot.journal.0.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_journal_carries_matchup_odds() {
    let mut data = matchup();
    data.fighter_blue_info = None;
    if let Some(red) = data.fighter_red_info.as_mut() {
      red.matches = [1, 1, 1, 3]
        .into_iter()
        .map(|winner| MatchRecord {
          fighter_red: 1,
          fighter_blue: 3,
          bet_red: 100.0,
          bet_blue: 100.0,
          winner,
        })
        .collect();
    }
    let mut bot = betting_loop(FixedFeed(Some(data)), elo_settings());
    bot.run_cycle().await.unwrap();

    let journal = bot.journal.0.lock().unwrap();
    // Blue unknown: red's overall win rate.
    let odds = journal[0].odds.unwrap();
    assert_eq!(odds.first, 0.75);
    assert_eq!(odds.second, 0.25);
    assert_eq!(odds.favourite(), Favourite::First);
  }

  #[tokio::test]
  async fn test_panicking_cycle_clears_readiness() {
    let health = Arc::new(HealthState::new());
    let mut bot = BettingLoop::new(
      Arc::new(BrokenFeed),
      Arc::new(PaperExecution::new(1100)),
      Arc::new(FixedSettings(elo_settings())),
      Arc::new(MemoryJournal::default()),
      DecisionEngine::seeded(1),
      Duration::from_millis(10),
    )
    .with_health(Arc::clone(&health));
    let (_tx, rx) = broadcast::channel(1);

    let handle = tokio::spawn(async move { bot.run(rx).await });
    assert!(handle.await.unwrap_err().is_panic());
    assert!(!health.loop_running.load(std::sync::atomic::Ordering::Relaxed));
    assert!(!health.is_ready());
  }

  #[tokio::test]
  async fn test_no_match() {
    let mut bot = betting_loop(FixedFeed(None), elo_settings());
    assert_eq!(bot.run_cycle().await.unwrap(), CycleOutcome::NoMatch);
    assert!(bot.last_decision().is_none());
  }

  #[tokio::test]
  async fn test_disabled_betting_records_but_does_not_stake() {
    let settings = BetSettings {
      enable_betting: false,
      ..elo_settings()
    };
    let mut bot = betting_loop(FixedFeed(Some(matchup())), settings);

    let CycleOutcome::Decided { decision, receipt } = bot.run_cycle().await.unwrap() else {
      panic!("expected a decision");
    };
    assert_eq!(decision.wager, Wager::NoBet);
    assert!(receipt.is_none());

    let journal = bot.journal.0.lock().unwrap();
    assert!(journal[0].was_sized_by(SizingRule::BettingDisabled));
  }

  #[tokio::test]
  async fn test_invalid_mode_is_retried() {
    let settings = BetSettings {
      bet_mode: "martingale".to_string(),
      ..BetSettings::default()
    };
    let mut bot = betting_loop(FixedFeed(Some(matchup())), settings);

    let outcome = bot.run_cycle().await.unwrap();
    assert!(matches!(outcome, CycleOutcome::InvalidBetMode(ref msg) if msg.contains("martingale")));
    // Not marked decided.
    assert!(matches!(bot.run_cycle().await.unwrap(), CycleOutcome::InvalidBetMode(_)));
    assert!(bot.journal.0.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_run_stops_on_shutdown() {
    let health = Arc::new(HealthState::new());
    let mut bot = betting_loop(FixedFeed(None), elo_settings()).with_health(Arc::clone(&health));
    let (tx, rx) = broadcast::channel(1);

    let handle = tokio::spawn(async move {
      bot.run(rx).await.unwrap();
      bot
    });
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(health.is_ready());

    tx.send(()).unwrap();
    handle.await.unwrap();
    assert!(!health.is_ready());
  }
}
