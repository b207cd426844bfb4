//! Matchup odds for display.
//!
//! A coarser estimate than the strategies: it only looks at raw win
//! counts, and it still answers when one or both fighters are unknown.

use serde::{Deserialize, Serialize};

use super::fighter::FighterInfo;
use super::head_to_head::aggregate;
use super::stats::win_count;

/// Which side of a matchup the odds favour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Favourite {
    First,
    Second,
    Tie,
}

/// Win probabilities for two fighters; they always sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchupOdds {
    pub first: f64,
    pub second: f64,
}

impl MatchupOdds {
    const fn from_first(first: f64) -> Self {
        Self {
            first,
            second: 1.0 - first,
        }
    }

    pub fn favourite(&self) -> Favourite {
        if self.first > self.second {
            Favourite::First
        } else if self.second > self.first {
            Favourite::Second
        } else {
            Favourite::Tie
        }
    }
}

/// Overall win rate, `0.5` for a fighter with no recorded matches.
fn overall_rate(info: &FighterInfo) -> f64 {
    if info.matches.is_empty() {
        return 0.5;
    }
    f64::from(win_count(info.id, &info.matches)) / info.matches.len() as f64
}

/// Odds of `first` beating `second`.
///
/// - Only one fighter known: that fighter's overall win rate.
/// - Neither known: even.
/// - Any head-to-head wins: share of those wins.
/// - Otherwise: `first`'s wins over both fighters' combined match count.
pub fn matchup_odds(first: Option<&FighterInfo>, second: Option<&FighterInfo>) -> MatchupOdds {
    match (first, second) {
        (None, None) => MatchupOdds::from_first(0.5),
        (Some(first), None) => MatchupOdds::from_first(overall_rate(first)),
        (None, Some(second)) => MatchupOdds::from_first(1.0 - overall_rate(second)),
        (Some(first), Some(second)) => {
            let h2h = aggregate(&first.matches, first.id, second.id);
            let decided = h2h.a_wins + h2h.b_wins;
            if decided > 0 {
                return MatchupOdds::from_first(f64::from(h2h.a_wins) / f64::from(decided));
            }

            let combined = first.matches.len() + second.matches.len();
            if combined == 0 {
                return MatchupOdds::from_first(0.5);
            }
            let wins = f64::from(win_count(first.id, &first.matches));
            MatchupOdds::from_first(wins / combined as f64)
        }
    }
}
