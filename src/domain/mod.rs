//! Domain layer - Core betting logic and models.
//!
//! Pure, synchronous code: match snapshots in, bet recommendations and
//! stakes out. No I/O here (hexagonal architecture inner ring).
//! All types are serializable and testable in isolation.

pub mod bet;
pub mod elo;
pub mod fighter;
pub mod head_to_head;
pub mod odds;
pub mod settings;
pub mod stats;
pub mod strategy;
pub mod wager;

// Re-export core types for convenience
pub use bet::{BetData, Colour, Wager};
pub use fighter::{
    FighterId, FighterInfo, FighterStats, MatchData, MatchFormat, MatchKey, MatchRecord, Tier,
};
pub use head_to_head::{HeadToHead, aggregate};
pub use odds::{Favourite, MatchupOdds, matchup_odds};
pub use settings::{BetSettings, BetTierFlags};
pub use strategy::{BetMode, ParseBetModeError, Strategy, StrategyTable};
pub use wager::{SizingRule, WagerPolicy};
