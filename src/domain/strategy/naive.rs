use rand::RngCore;

use super::{BetMode, Strategy, lean};
use crate::domain::bet::{BetData, Colour};
use crate::domain::fighter::{FighterInfo, MatchData};
use crate::domain::head_to_head::aggregate;

/// Bets on past results.
///
/// Prefers the head-to-head record between the two fighters; ties there go
/// to whoever drew the bigger average pot in those meetings. Without any
/// meetings it compares overall win rates instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Naive;

impl Naive {
    fn overall(red: &FighterInfo, blue: &FighterInfo) -> BetData {
        let red_rate = red.stats.win_rate;
        let blue_rate = blue.stats.win_rate;
        if !red_rate.is_finite() || !blue_rate.is_finite() {
            return BetData::no_data();
        }

        if red_rate == blue_rate {
            let colour = if red.stats.average_bet < blue.stats.average_bet {
                Colour::Blue
            } else {
                Colour::Red
            };
            BetData::new(colour, 0.5)
        } else if blue_rate > red_rate {
            BetData::new(Colour::Blue, blue_rate / (red_rate + blue_rate))
        } else {
            BetData::new(Colour::Red, red_rate / (red_rate + blue_rate))
        }
    }
}

impl Strategy for Naive {
    fn mode(&self) -> BetMode {
        BetMode::Naive
    }

    fn evaluate(&self, match_data: &MatchData, _rng: &mut dyn RngCore) -> BetData {
        let Some((red, blue)) = match_data.fighters() else {
            return BetData::no_data();
        };

        let h2h = aggregate(&red.matches, red.id, blue.id);
        match (h2h.a_win_rate(), h2h.a_average_bet(), h2h.b_average_bet()) {
            (Some(red_rate), Some(red_avg), Some(blue_avg)) => lean(red_rate, blue_avg > red_avg),
            _ => Self::overall(red, blue),
        }
    }
}

/// Bets against whoever [`Naive`] favours, at the same confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Upset;

impl Strategy for Upset {
    fn mode(&self) -> BetMode {
        BetMode::Upset
    }

    fn evaluate(&self, match_data: &MatchData, rng: &mut dyn RngCore) -> BetData {
        let bet = Naive.evaluate(match_data, rng);
        if bet.confidence.is_some() { bet.inverted() } else { bet }
    }
}
