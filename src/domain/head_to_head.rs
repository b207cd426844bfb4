//! Head-to-head aggregation between two specific fighters.
//!
//! Corner colour is incidental: a match counts whenever the two fighters
//! faced each other, and bets are attributed to whichever corner each
//! fighter held in that particular match.

use super::fighter::{FighterId, MatchRecord};

/// Pairwise totals of fighter A against fighter B.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadToHead {
    /// Matches A won against B.
    pub a_wins: u32,
    /// Matches B won against A.
    pub b_wins: u32,
    /// Every match between the two, including malformed ones.
    pub total_matches: u32,
    /// Sum of pots wagered on A across those matches.
    pub a_bet_total: f64,
    /// Sum of pots wagered on B across those matches.
    pub b_bet_total: f64,
}

impl HeadToHead {
    /// A's win rate against B, if they ever met.
    pub fn a_win_rate(&self) -> Option<f64> {
        (self.total_matches > 0).then(|| f64::from(self.a_wins) / f64::from(self.total_matches))
    }

    /// Average pot on A when facing B.
    pub fn a_average_bet(&self) -> Option<f64> {
        (self.total_matches > 0).then(|| self.a_bet_total / f64::from(self.total_matches))
    }

    /// Average pot on B when facing A.
    pub fn b_average_bet(&self) -> Option<f64> {
        (self.total_matches > 0).then(|| self.b_bet_total / f64::from(self.total_matches))
    }

    /// Matches whose recorded winner was neither fighter.
    pub const fn undecided(&self) -> u32 {
        self.total_matches - self.a_wins - self.b_wins
    }
}

/// Aggregates every match in `matches` between `a` and `b`.
///
/// A record whose winner is neither participant still counts toward
/// `total_matches` but toward nobody's wins; debug builds assert on it.
pub fn aggregate(matches: &[MatchRecord], a: FighterId, b: FighterId) -> HeadToHead {
    let mut totals = HeadToHead::default();

    for record in matches.iter().filter(|m| m.is_between(a, b)) {
        debug_assert!(
            record.has_valid_winner(),
            "match winner {} is neither {} nor {}",
            record.winner,
            record.fighter_red,
            record.fighter_blue
        );

        totals.total_matches += 1;
        if record.winner == a {
            totals.a_wins += 1;
        } else if record.winner == b {
            totals.b_wins += 1;
        }

        if record.fighter_red == a {
            totals.a_bet_total += record.bet_red;
            totals.b_bet_total += record.bet_blue;
        } else {
            totals.a_bet_total += record.bet_blue;
            totals.b_bet_total += record.bet_red;
        }
    }

    totals
}
