//! Wager sizing.
//!
//! Turns a strategy's confidence into a stake. Rules are checked in a fixed
//! order and the first one that applies decides the stake:
//!
//! 1. tournament with all-in enabled: whole balance
//! 2. exhibition: flat stake, or no bet when the flat stake rounds to 0
//! 3. matchmaking tier disabled: no bet
//! 4. balance below the all-in threshold: whole balance
//! 5. no confidence: minimum stake
//! 6. confidence below threshold: minimum stake
//! 7. balance scaled by confidence, capped by percentage and/or amount
//!
//! Settings come from an untyped store, so limits are sanitized once in
//! [`WagerPolicy::from_settings`]: anything negative or non-finite counts
//! as `0` (disabled).

use serde::Serialize;

use super::bet::Wager;
use super::fighter::{MatchFormat, Tier};
use super::settings::{BetSettings, BetTierFlags};

/// Smallest stake the site accepts.
pub const MIN_STAKE: u64 = 1;

/// Which sizing rule produced a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingRule {
    TournamentAllIn,
    Exhibition,
    TierDisabled,
    BankrollProtection,
    NoConfidence,
    BelowThreshold,
    Scaled,
    /// Betting is switched off; sizing never ran.
    BettingDisabled,
}

impl SizingRule {
    /// Stable label for logs and metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TournamentAllIn => "tournament_all_in",
            Self::Exhibition => "exhibition",
            Self::TierDisabled => "tier_disabled",
            Self::BankrollProtection => "bankroll_protection",
            Self::NoConfidence => "no_confidence",
            Self::BelowThreshold => "below_threshold",
            Self::Scaled => "scaled",
            Self::BettingDisabled => "betting_disabled",
        }
    }
}

impl std::fmt::Display for SizingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treats negative and non-finite limits as disabled.
fn limit(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Rounds half away from zero and clamps into `[0, balance]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn stake(value: f64, balance: u64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let rounded = value.round().min(balance as f64);
    (rounded as u64).min(balance)
}

/// Sanitized sizing limits taken from [`BetSettings`].
#[derive(Debug, Clone, PartialEq)]
pub struct WagerPolicy {
    all_in_until: f64,
    /// Percent, `[0, 100]`.
    max_bet_percentage: f64,
    max_bet_amount: f64,
    all_in_tournaments: bool,
    exhibition_bet: f64,
    bet_tier: BetTierFlags,
    /// Percent, compared against `confidence * 100`.
    confidence_threshold: f64,
}

impl WagerPolicy {
    pub fn from_settings(settings: &BetSettings) -> Self {
        Self {
            all_in_until: limit(settings.all_in_until),
            max_bet_percentage: limit(settings.max_bet_percentage).min(100.0),
            max_bet_amount: limit(settings.max_bet_amount),
            all_in_tournaments: settings.all_in_tournaments,
            exhibition_bet: limit(settings.exhibition_bet),
            bet_tier: settings.bet_tier,
            confidence_threshold: limit(settings.confidence_threshold),
        }
    }

    /// Stake for one match.
    pub fn size(
        &self,
        balance: u64,
        confidence: Option<f64>,
        format: MatchFormat,
        tier: Option<Tier>,
    ) -> Wager {
        self.size_with_rule(balance, confidence, format, tier).0
    }

    /// Stake for one match, plus the rule that decided it.
    ///
    /// Never exceeds `balance`. A `NaN` confidence is treated as absent and
    /// anything outside `[0, 1]` is clamped.
    #[allow(clippy::cast_precision_loss)]
    pub fn size_with_rule(
        &self,
        balance: u64,
        confidence: Option<f64>,
        format: MatchFormat,
        tier: Option<Tier>,
    ) -> (Wager, SizingRule) {
        let bankroll = balance as f64;

        match format {
            MatchFormat::Tournament if self.all_in_tournaments => {
                return (Wager::Amount(balance), SizingRule::TournamentAllIn);
            }
            MatchFormat::Exhibition => {
                let wager = if self.exhibition_bet.round() == 0.0 {
                    Wager::NoBet
                } else {
                    Wager::Amount(stake(self.exhibition_bet, balance))
                };
                return (wager, SizingRule::Exhibition);
            }
            MatchFormat::Matchmaking => {
                if tier.is_some_and(|t| !self.bet_tier.allows(t)) {
                    return (Wager::NoBet, SizingRule::TierDisabled);
                }
            }
            MatchFormat::Tournament => {}
        }

        if self.all_in_until != 0.0 && bankroll < self.all_in_until {
            return (Wager::Amount(balance), SizingRule::BankrollProtection);
        }

        let Some(confidence) = confidence.filter(|c| !c.is_nan()) else {
            return (Wager::Amount(MIN_STAKE.min(balance)), SizingRule::NoConfidence);
        };
        let confidence = confidence.clamp(0.0, 1.0);

        if confidence * 100.0 < self.confidence_threshold {
            return (Wager::Amount(MIN_STAKE.min(balance)), SizingRule::BelowThreshold);
        }

        let base = bankroll * confidence;
        let percentage_cap =
            (self.max_bet_percentage != 0.0).then(|| base * (self.max_bet_percentage / 100.0));
        let amount_cap =
            (self.max_bet_amount != 0.0).then(|| self.max_bet_amount.min(bankroll) * confidence);

        let sized = match (percentage_cap, amount_cap) {
            (Some(pct), Some(amount)) => pct.min(amount),
            (Some(cap), None) | (None, Some(cap)) => cap,
            (None, None) => base,
        };

        (Wager::Amount(stake(sized, balance)), SizingRule::Scaled)
    }
}

impl Default for WagerPolicy {
    fn default() -> Self {
        Self::from_settings(&BetSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(edit: impl FnOnce(&mut BetSettings)) -> WagerPolicy {
        let mut settings = BetSettings::default();
        edit(&mut settings);
        WagerPolicy::from_settings(&settings)
    }

    const MM: MatchFormat = MatchFormat::Matchmaking;

    #[test]
    fn test_percentage_cap() {
        let p = policy(|s| s.max_bet_percentage = 5.0);
        assert_eq!(
            p.size_with_rule(1000, Some(0.8), MM, Some(Tier::A)),
            (Wager::Amount(40), SizingRule::Scaled)
        );
    }

    #[test]
    fn test_amount_cap() {
        let p = policy(|s| {
            s.max_bet_percentage = 0.0;
            s.max_bet_amount = 100.0;
        });
        assert_eq!(p.size(1000, Some(0.8), MM, Some(Tier::A)), Wager::Amount(80));
    }

    #[test]
    fn test_both_caps_take_minimum() {
        let p = policy(|s| {
            s.max_bet_percentage = 50.0;
            s.max_bet_amount = 100.0;
        });
        // pct = 400, amount = 80
        assert_eq!(p.size(1000, Some(0.8), MM, None), Wager::Amount(80));

        let p = policy(|s| {
            s.max_bet_percentage = 5.0;
            s.max_bet_amount = 5000.0;
        });
        // pct = 40, amount = min(5000, 1000) * 0.8 = 800
        assert_eq!(p.size(1000, Some(0.8), MM, None), Wager::Amount(40));
    }

    #[test]
    fn test_uncapped_uses_scaled_balance() {
        let p = policy(|s| s.max_bet_percentage = 0.0);
        assert_eq!(p.size(1000, Some(0.75), MM, None), Wager::Amount(750));
    }

    #[test]
    fn test_rounds_to_nearest_unit() {
        let p = policy(|s| s.max_bet_percentage = 10.0);
        // 333 * 0.6 * 0.1 = 19.98
        assert_eq!(p.size(333, Some(0.6), MM, None), Wager::Amount(20));
    }

    #[test]
    fn test_tournament_all_in_ignores_confidence() {
        let p = WagerPolicy::default();
        for confidence in [None, Some(0.0), Some(0.51), Some(1.0)] {
            assert_eq!(
                p.size_with_rule(777, confidence, MatchFormat::Tournament, None),
                (Wager::Amount(777), SizingRule::TournamentAllIn)
            );
        }
    }

    #[test]
    fn test_tournament_without_all_in_is_scaled() {
        let p = policy(|s| s.all_in_tournaments = false);
        assert_eq!(
            p.size_with_rule(1000, Some(0.8), MatchFormat::Tournament, None),
            (Wager::Amount(40), SizingRule::Scaled)
        );
    }

    #[test]
    fn test_exhibition() {
        let p = policy(|s| s.exhibition_bet = 0.0);
        assert_eq!(p.size(5000, Some(1.0), MatchFormat::Exhibition, None), Wager::NoBet);

        let p = policy(|s| s.exhibition_bet = 25.0);
        assert_eq!(
            p.size_with_rule(5000, None, MatchFormat::Exhibition, None),
            (Wager::Amount(25), SizingRule::Exhibition)
        );
        // Flat stake never exceeds the balance.
        assert_eq!(p.size(10, None, MatchFormat::Exhibition, None), Wager::Amount(10));
    }

    #[test]
    fn test_exhibition_stake_rounding_to_zero_is_no_bet() {
        let p = policy(|s| s.exhibition_bet = 0.4);
        assert_eq!(
            p.size_with_rule(5000, Some(0.9), MatchFormat::Exhibition, None),
            (Wager::NoBet, SizingRule::Exhibition)
        );

        let p = policy(|s| s.exhibition_bet = 0.5);
        assert_eq!(p.size(5000, None, MatchFormat::Exhibition, None), Wager::Amount(1));
    }

    #[test]
    fn test_format_rules_win_over_bankroll_protection() {
        let p = policy(|s| {
            s.all_in_until = 500.0;
            s.exhibition_bet = 1.0;
            s.bet_tier.x = false;
        });
        assert_eq!(
            p.size_with_rule(100, None, MatchFormat::Exhibition, None),
            (Wager::Amount(1), SizingRule::Exhibition)
        );
        assert_eq!(
            p.size_with_rule(100, Some(0.9), MM, Some(Tier::X)),
            (Wager::NoBet, SizingRule::TierDisabled)
        );
        assert_eq!(
            p.size_with_rule(100, Some(0.9), MM, Some(Tier::A)),
            (Wager::Amount(100), SizingRule::BankrollProtection)
        );
    }

    #[test]
    fn test_tournament_all_in_wins_over_threshold() {
        let p = WagerPolicy::default();
        assert_eq!(
            p.size_with_rule(2500, Some(0.1), MatchFormat::Tournament, None),
            (Wager::Amount(2500), SizingRule::TournamentAllIn)
        );
    }

    #[test]
    fn test_disabled_tier_is_no_bet() {
        let p = policy(|s| s.bet_tier.x = false);
        assert_eq!(
            p.size_with_rule(1000, Some(0.99), MM, Some(Tier::X)),
            (Wager::NoBet, SizingRule::TierDisabled)
        );
        assert!(p.size(1000, Some(0.99), MM, Some(Tier::S)).is_bet());
        // Missing tier is not filtered.
        assert!(p.size(1000, Some(0.99), MM, None).is_bet());
    }

    #[test]
    fn test_tier_filter_only_applies_to_matchmaking() {
        let p = policy(|s| {
            s.bet_tier.s = false;
            s.all_in_tournaments = false;
        });
        assert!(p.size(1000, Some(0.8), MatchFormat::Tournament, Some(Tier::S)).is_bet());
    }

    #[test]
    fn test_bankroll_protection() {
        let p = policy(|s| s.all_in_until = 500.0);
        assert_eq!(
            p.size_with_rule(499, None, MM, None),
            (Wager::Amount(499), SizingRule::BankrollProtection)
        );
        assert_eq!(p.size_with_rule(500, None, MM, None).1, SizingRule::NoConfidence);
    }

    #[test]
    fn test_minimum_stakes() {
        let p = WagerPolicy::default();
        assert_eq!(
            p.size_with_rule(1000, None, MM, None),
            (Wager::Amount(1), SizingRule::NoConfidence)
        );
        assert_eq!(
            p.size_with_rule(1000, Some(0.49), MM, None),
            (Wager::Amount(1), SizingRule::BelowThreshold)
        );
        assert_eq!(
            p.size_with_rule(1000, Some(f64::NAN), MM, None),
            (Wager::Amount(1), SizingRule::NoConfidence)
        );
        assert_eq!(p.size(0, None, MM, None), Wager::Amount(0));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let p = WagerPolicy::default();
        assert_eq!(p.size_with_rule(1000, Some(0.5), MM, None).1, SizingRule::Scaled);
    }

    #[test]
    fn test_invalid_limits_are_unset() {
        let p = policy(|s| {
            s.max_bet_percentage = f64::NAN;
            s.max_bet_amount = -50.0;
            s.all_in_until = f64::INFINITY;
            s.confidence_threshold = -10.0;
        });
        assert_eq!(
            p.size_with_rule(1000, Some(0.1), MM, None),
            (Wager::Amount(100), SizingRule::Scaled)
        );
    }

    #[test]
    fn test_percentage_over_100_is_clamped() {
        let p = policy(|s| s.max_bet_percentage = 250.0);
        assert_eq!(p.size(1000, Some(1.0), MM, None), Wager::Amount(1000));
    }

    #[test]
    fn test_confidence_clamped() {
        let p = policy(|s| s.max_bet_percentage = 0.0);
        assert_eq!(p.size(1000, Some(1.7), MM, None), Wager::Amount(1000));
    }
}
