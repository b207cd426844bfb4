//! Betting strategies.
//!
//! Each strategy turns a [`MatchData`] snapshot into a [`BetData`]
//! recommendation. Strategies are stateless; the only outside input is the
//! randomness source, which only the coin-flip strategy consumes.
//!
//! All strategies except `passive` and `rng` answer `red` with no
//! confidence when either fighter is unknown to the backend.

mod basic;
mod elo;
mod naive;

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use thiserror::Error;

use super::bet::{BetData, Colour};
use super::fighter::MatchData;

pub use basic::{CoinFlip, Passive};
pub use elo::{EloStrategy, RatingKind};
pub use naive::{Naive, Upset};

/// A betting heuristic.
pub trait Strategy: Send + Sync {
    /// Mode this strategy is registered under.
    fn mode(&self) -> BetMode;

    /// Recommends a corner for `match_data`.
    ///
    /// Must not fail: missing data yields [`BetData::no_data`].
    fn evaluate(&self, match_data: &MatchData, rng: &mut dyn RngCore) -> BetData;
}

// ────────────────────────────────────────────
// Bet modes
// ────────────────────────────────────────────

/// Closed set of selectable strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetMode {
    Passive,
    Rng,
    Naive,
    Elo,
    EloTier,
    Upset,
}

impl BetMode {
    pub const ALL: [Self; 6] = [
        Self::Passive,
        Self::Rng,
        Self::Naive,
        Self::Elo,
        Self::EloTier,
        Self::Upset,
    ];

    /// Name as stored in bet settings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passive => "passive",
            Self::Rng => "rng",
            Self::Naive => "naive",
            Self::Elo => "elo",
            Self::EloTier => "eloTier",
            Self::Upset => "upset",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings named a bet mode that no strategy is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bet mode: {0:?}")]
pub struct ParseBetModeError(pub String);

impl FromStr for BetMode {
    type Err = ParseBetModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseBetModeError(s.to_string()))
    }
}

// ────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────

static PASSIVE: Passive = Passive;
static COIN_FLIP: CoinFlip = CoinFlip;
static NAIVE: Naive = Naive;
static ELO: EloStrategy = EloStrategy::new(RatingKind::Overall);
static ELO_TIER: EloStrategy = EloStrategy::new(RatingKind::Tier);
static UPSET: Upset = Upset;

static STANDARD: StrategyTable = StrategyTable {
    strategies: [&PASSIVE, &COIN_FLIP, &NAIVE, &ELO, &ELO_TIER, &UPSET],
};

/// Fixed mode-to-strategy table.
#[derive(Clone, Copy)]
pub struct StrategyTable {
    strategies: [&'static dyn Strategy; 6],
}

impl StrategyTable {
    /// Every built-in strategy, indexed by [`BetMode`].
    pub fn standard() -> Self {
        STANDARD
    }

    pub fn get(&self, mode: BetMode) -> &'static dyn Strategy {
        self.strategies[mode.index()]
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for StrategyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|s| s.mode()))
            .finish()
    }
}

// ────────────────────────────────────────────
// Shared rules
// ────────────────────────────────────────────

/// Picks a side from red's chance of winning.
///
/// Below one half bets blue at `1 - red_rate`, above it bets red at
/// `red_rate`. Exactly one half is a tie at confidence `0.5`, resolved to
/// blue when `tie_to_blue`. The comparison is exact. Non-finite input
/// means there is nothing to go on.
fn lean(red_rate: f64, tie_to_blue: bool) -> BetData {
    if !red_rate.is_finite() {
        return BetData::no_data();
    }

    if red_rate < 0.5 {
        BetData::new(Colour::Blue, 1.0 - red_rate)
    } else if red_rate == 0.5 {
        let colour = if tie_to_blue { Colour::Blue } else { Colour::Red };
        BetData::new(colour, 0.5)
    } else {
        BetData::new(Colour::Red, red_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_round_trip() {
        for mode in BetMode::ALL {
            assert_eq!(mode.to_string().parse::<BetMode>(), Ok(mode));
        }
        assert_eq!("eloTier".parse(), Ok(BetMode::EloTier));
    }

    #[test]
    fn test_unknown_mode() {
        let err = "martingale".parse::<BetMode>().unwrap_err();
        assert_eq!(err, ParseBetModeError("martingale".to_string()));
        assert!(err.to_string().contains("martingale"));
        // Names are case-sensitive.
        assert!("ELO".parse::<BetMode>().is_err());
        assert!("elotier".parse::<BetMode>().is_err());
    }

    #[test]
    fn test_table_entries_match_modes() {
        let table = StrategyTable::default();
        for mode in BetMode::ALL {
            assert_eq!(table.get(mode).mode(), mode);
        }
    }

    #[test]
    fn test_lean() {
        assert_eq!(lean(0.25, false), BetData::new(Colour::Blue, 0.75));
        assert_eq!(lean(0.8, true), BetData::new(Colour::Red, 0.8));
        assert_eq!(lean(0.5, false), BetData::new(Colour::Red, 0.5));
        assert_eq!(lean(0.5, true), BetData::new(Colour::Blue, 0.5));
        assert_eq!(lean(f64::NAN, true), BetData::no_data());
    }
}
