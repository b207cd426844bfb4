//! User betting policy, as kept by the settings store.
//!
//! The store may hand back partial records, so every field has a
//! well-defined default and deserialization fills in whatever is missing.
//! Keys are camelCase to match the stored record.

use serde::{Deserialize, Serialize};

use super::fighter::Tier;

/// Which matchmaking tiers the user is willing to bet on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BetTierFlags {
    pub x: bool,
    pub s: bool,
    pub a: bool,
    pub b: bool,
    pub p: bool,
}

impl BetTierFlags {
    /// Whether betting is enabled for `tier`.
    pub const fn allows(&self, tier: Tier) -> bool {
        match tier {
            Tier::X => self.x,
            Tier::S => self.s,
            Tier::A => self.a,
            Tier::B => self.b,
            Tier::P => self.p,
        }
    }
}

impl Default for BetTierFlags {
    fn default() -> Self {
        Self {
            x: true,
            s: true,
            a: true,
            b: true,
            p: true,
        }
    }
}

/// Per-cycle betting policy.
///
/// Numeric limits use `0` to mean "disabled". They are kept as `f64`
/// because the store is untyped; the sizing policy sanitizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BetSettings {
    /// Strategy name (`naive`, `elo`, ...). Parsed by the decision engine.
    pub bet_mode: String,
    /// Go all-in while the balance is below this value.
    pub all_in_until: f64,
    /// Percentage of the confidence-scaled balance to stake, `[0, 100]`.
    pub max_bet_percentage: f64,
    /// Absolute stake ceiling before confidence scaling.
    pub max_bet_amount: f64,
    /// Stake the whole balance on tournament matches.
    pub all_in_tournaments: bool,
    /// Master switch; when off, decisions are computed but never staked.
    pub enable_betting: bool,
    /// Flat stake for exhibitions; `0` skips them.
    pub exhibition_bet: f64,
    /// Bet against whichever side the strategy favours.
    pub upset_mode: bool,
    /// Minimum confidence, in percent, before stakes scale above 1.
    pub confidence_threshold: f64,
    /// Kept last so TOML output places the table after plain keys.
    pub bet_tier: BetTierFlags,
}

impl Default for BetSettings {
    fn default() -> Self {
        Self {
            bet_mode: "naive".to_string(),
            all_in_until: 0.0,
            max_bet_percentage: 5.0,
            max_bet_amount: 0.0,
            all_in_tournaments: true,
            enable_betting: true,
            exhibition_bet: 1.0,
            upset_mode: false,
            confidence_threshold: 50.0,
            bet_tier: BetTierFlags::default(),
        }
    }
}
