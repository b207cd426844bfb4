use rand::RngCore;

use super::{BetMode, Strategy, lean};
use crate::domain::bet::BetData;
use crate::domain::elo::expected_score;
use crate::domain::fighter::{FighterInfo, MatchData};

/// Which rating an [`EloStrategy`] compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingKind {
    /// Lifetime rating (`elo`).
    Overall,
    /// Rating within the current tier (`tier_elo`).
    Tier,
}

impl RatingKind {
    const fn of(self, info: &FighterInfo) -> f64 {
        match self {
            Self::Overall => info.elo,
            Self::Tier => info.tier_elo,
        }
    }
}

/// Bets on the Elo favourite.
///
/// Evenly rated fighters are a tie at `0.5`, broken toward blue when red
/// draws the smaller average bet.
#[derive(Debug, Clone, Copy)]
pub struct EloStrategy {
    rating: RatingKind,
}

impl EloStrategy {
    pub const fn new(rating: RatingKind) -> Self {
        Self { rating }
    }
}

impl Strategy for EloStrategy {
    fn mode(&self) -> BetMode {
        match self.rating {
            RatingKind::Overall => BetMode::Elo,
            RatingKind::Tier => BetMode::EloTier,
        }
    }

    fn evaluate(&self, match_data: &MatchData, _rng: &mut dyn RngCore) -> BetData {
        let Some((red, blue)) = match_data.fighters() else {
            return BetData::no_data();
        };

        let red_win = expected_score(self.rating.of(red), self.rating.of(blue));
        lean(red_win, red.average_bet() < blue.average_bet())
    }
}
