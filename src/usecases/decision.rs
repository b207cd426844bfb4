//! Decision Engine - Strategy Selection and Wager Sizing
//!
//! One call per open match:
//! 1. Resolves the configured bet mode to a registered strategy
//! 2. Evaluates it against the match snapshot
//! 3. Applies upset inversion when enabled
//! 4. Sizes the wager (skipped when betting is disabled)
//!
//! The engine performs no I/O. The balance is read by the caller and
//! passed in, and settings are passed on every call rather than kept.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::bet::{BetData, Wager};
use crate::domain::fighter::MatchData;
use crate::domain::settings::BetSettings;
use crate::domain::strategy::{BetMode, ParseBetModeError, StrategyTable};
use crate::domain::wager::{SizingRule, WagerPolicy};

/// Errors that leave the previous decision in effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
  /// Settings name a bet mode with no registered strategy.
  #[error("invalid bet mode: {0}")]
  InvalidBetMode(#[from] ParseBetModeError),
}

/// Outcome of one decision cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
  /// Strategy that produced the recommendation.
  pub bet_mode: BetMode,
  /// Recommendation, after upset inversion.
  pub bet_data: BetData,
  /// Final stake.
  pub wager: Wager,
  /// Sizing rule behind `wager`.
  pub rule: SizingRule,
}

/// Confidence outside `[0, 1]` is clamped; `NaN` means no opinion.
fn sanitize(bet: BetData) -> BetData {
  BetData {
    colour: bet.colour,
    confidence: bet
      .confidence
      .filter(|c| !c.is_nan())
      .map(|c| c.clamp(0.0, 1.0)),
  }
}

/// Picks a strategy, evaluates it and sizes the wager.
pub struct DecisionEngine<R: RngCore = StdRng> {
  /// Mode-to-strategy registry.
  strategies: StrategyTable,
  /// Randomness for the coin-flip strategy.
  rng: R,
  /// Last successful decision, kept for display continuity.
  last: Option<Decision>,
}

impl DecisionEngine<StdRng> {
  /// Engine with an entropy-seeded randomness source.
  pub fn new() -> Self {
    Self::with_rng(StdRng::from_entropy())
  }

  /// Engine whose coin flips are reproducible from `seed`.
  pub fn seeded(seed: u64) -> Self {
    Self::with_rng(StdRng::seed_from_u64(seed))
  }
}

impl Default for DecisionEngine<StdRng> {
  fn default() -> Self {
    Self::new()
  }
}

impl<R: RngCore> DecisionEngine<R> {
  /// Engine drawing randomness from `rng`.
  pub fn with_rng(rng: R) -> Self {
    Self {
      strategies: StrategyTable::standard(),
      rng,
      last: None,
    }
  }

  /// Decide colour and stake for `match_data`.
  ///
  /// # Errors
  /// [`DecisionError::InvalidBetMode`] when `settings.bet_mode` is not a
  /// known mode. The previous decision stays in effect.
  pub fn decide(
    &mut self,
    match_data: &MatchData,
    settings: &BetSettings,
    balance: u64,
  ) -> Result<Decision, DecisionError> {
    let bet_mode: BetMode = settings.bet_mode.parse().map_err(|e: ParseBetModeError| {
      warn!(bet_mode = %e.0, "Unknown bet mode, keeping previous decision");
      DecisionError::from(e)
    })?;

    let strategy = self.strategies.get(bet_mode);
    let mut bet_data = sanitize(strategy.evaluate(match_data, &mut self.rng));

    if settings.upset_mode {
      debug!(
        colour = %bet_data.colour,
        "Upset mode enabled, betting the other corner"
      );
      bet_data = bet_data.inverted();
    }

    let (wager, rule) = if settings.enable_betting {
      WagerPolicy::from_settings(settings).size_with_rule(
        balance,
        bet_data.confidence,
        match_data.match_format,
        match_data.tier,
      )
    } else {
      (Wager::NoBet, SizingRule::BettingDisabled)
    };

    let decision = Decision {
      bet_mode,
      bet_data,
      wager,
      rule,
    };

    debug!(
      bet_mode = %bet_mode,
      colour = %decision.bet_data.colour,
      confidence = ?decision.bet_data.confidence,
      wager = %decision.wager,
      rule = %rule,
      "Decision made"
    );

    self.last = Some(decision);
    Ok(decision)
  }

  /// Most recent successful decision.
  pub fn last_decision(&self) -> Option<&Decision> {
    self.last.as_ref()
  }
}
