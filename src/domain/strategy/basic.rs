use rand::{Rng, RngCore};

use super::{BetMode, Strategy};
use crate::domain::bet::{BetData, Colour};
use crate::domain::fighter::MatchData;

/// Never forms an opinion; sizing falls through to the minimum stake.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passive;

impl Strategy for Passive {
    fn mode(&self) -> BetMode {
        BetMode::Passive
    }

    fn evaluate(&self, _match_data: &MatchData, _rng: &mut dyn RngCore) -> BetData {
        BetData::no_data()
    }
}

/// Fair coin flip at full confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinFlip;

impl Strategy for CoinFlip {
    fn mode(&self) -> BetMode {
        BetMode::Rng
    }

    fn evaluate(&self, _match_data: &MatchData, rng: &mut dyn RngCore) -> BetData {
        let colour = if rng.gen_bool(0.5) {
            Colour::Red
        } else {
            Colour::Blue
        };
        BetData::new(colour, 1.0)
    }
}
