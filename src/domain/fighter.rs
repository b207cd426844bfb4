//! Fighter and match domain types.
//!
//! Mirrors the JSON served by the match-data backend (`/current-match`):
//! fighter names, per-fighter info-or-null, match format and tier.
//! Everything here is an immutable snapshot for one decision cycle.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────

/// Backend-assigned fighter identifier.
pub type FighterId = i64;

// ────────────────────────────────────────────
// Enums
// ────────────────────────────────────────────

/// Match format announced when bets open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchFormat {
    /// Custom exhibition bouts, no tier and usually no fighter data.
    Exhibition,
    /// Bracket matches; balance is reset around them.
    Tournament,
    /// Regular tiered matches.
    Matchmaking,
}

impl std::fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhibition => write!(f, "exhibition"),
            Self::Tournament => write!(f, "tournament"),
            Self::Matchmaking => write!(f, "matchmaking"),
        }
    }
}

/// Skill bracket of a matchmaking match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    X,
    S,
    A,
    B,
    P,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::S => write!(f, "S"),
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::P => write!(f, "P"),
        }
    }
}

// ────────────────────────────────────────────
// Historical records
// ────────────────────────────────────────────

/// One completed match from a fighter's history.
///
/// Extra backend columns (date, streaks, tier, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Fighter that held the red corner.
    pub fighter_red: FighterId,
    /// Fighter that held the blue corner.
    pub fighter_blue: FighterId,
    /// Total pot wagered on red.
    pub bet_red: f64,
    /// Total pot wagered on blue.
    pub bet_blue: f64,
    /// Winning fighter.
    pub winner: FighterId,
}

impl MatchRecord {
    /// True when `a` and `b` are the two participants, in either corner.
    pub fn is_between(&self, a: FighterId, b: FighterId) -> bool {
        (self.fighter_red == a && self.fighter_blue == b)
            || (self.fighter_red == b && self.fighter_blue == a)
    }

    /// Pot wagered on `fighter` in this match, if they took part.
    pub fn bet_on(&self, fighter: FighterId) -> Option<f64> {
        if self.fighter_red == fighter {
            Some(self.bet_red)
        } else if self.fighter_blue == fighter {
            Some(self.bet_blue)
        } else {
            None
        }
    }

    /// Whether the recorded winner is one of the two participants.
    pub fn has_valid_winner(&self) -> bool {
        self.winner == self.fighter_red || self.winner == self.fighter_blue
    }
}

/// Aggregate performance across a fighter's whole history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterStats {
    pub total_matches: u32,
    /// Wins over total matches, `[0, 1]`.
    pub win_rate: f64,
    /// Mean pot wagered on this fighter.
    pub average_bet: f64,
}

/// Everything the backend knows about one fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterInfo {
    pub id: FighterId,
    /// Overall Elo rating (base 1500).
    pub elo: f64,
    /// Elo rating within the current tier; resets on tier change.
    pub tier_elo: f64,
    /// Top-level average bet. Older backends omit it; see [`Self::average_bet`].
    #[serde(default, rename = "average_bet")]
    pub average_bet_override: Option<f64>,
    #[serde(default)]
    pub stats: FighterStats,
    /// Full match history, arbitrary order.
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl FighterInfo {
    /// Average bet used for tie-breaks: the top-level value when present,
    /// otherwise the aggregate from `stats`.
    pub fn average_bet(&self) -> f64 {
        self.average_bet_override.unwrap_or(self.stats.average_bet)
    }
}

// ────────────────────────────────────────────
// Current match
// ────────────────────────────────────────────

/// The match currently open for betting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchData {
    /// Red corner display name.
    pub fighter_red: String,
    /// Blue corner display name.
    pub fighter_blue: String,
    /// `None` when the backend has never recorded this fighter.
    #[serde(default)]
    pub fighter_red_info: Option<FighterInfo>,
    #[serde(default)]
    pub fighter_blue_info: Option<FighterInfo>,
    pub match_format: MatchFormat,
    /// Exhibitions carry no tier.
    #[serde(default)]
    pub tier: Option<Tier>,
}

impl MatchData {
    /// Both fighters' info, or `None` if either is unknown.
    pub fn fighters(&self) -> Option<(&FighterInfo, &FighterInfo)> {
        match (&self.fighter_red_info, &self.fighter_blue_info) {
            (Some(red), Some(blue)) => Some((red, blue)),
            _ => None,
        }
    }

    /// Identity of this match for de-duplicating polling cycles.
    pub fn key(&self) -> MatchKey {
        MatchKey {
            fighter_red: self.fighter_red.clone(),
            fighter_blue: self.fighter_blue.clone(),
            match_format: self.match_format,
        }
    }
}

/// Identifies one announced match across repeated polls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub fighter_red: String,
    pub fighter_blue: String,
    pub match_format: MatchFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_MATCH_JSON: &str = r#"{
        "fighter_red": "Goku",
        "fighter_blue": "Vegeta",
        "match_format": "matchmaking",
        "tier": "A",
        "fighter_red_info": {
            "id": 7,
            "name": "Goku",
            "elo": 1532,
            "tier_elo": 1510,
            "best_streak": 3,
            "stats": { "total_matches": 2, "win_rate": 0.5, "average_bet": 1200.5 },
            "matches": [
                { "id": 1, "fighter_red": 7, "fighter_blue": 9, "bet_red": 1000, "bet_blue": 400, "winner": 7, "tier": "A" },
                { "id": 2, "fighter_red": 9, "fighter_blue": 7, "bet_red": 300, "bet_blue": 1401, "winner": 9, "tier": "A" }
            ]
        },
        "fighter_blue_info": null
    }"#;

    #[test]
    fn test_deserialize_current_match() {
        let data: MatchData = serde_json::from_str(CURRENT_MATCH_JSON).unwrap();
        assert_eq!(data.match_format, MatchFormat::Matchmaking);
        assert_eq!(data.tier, Some(Tier::A));
        let red = data.fighter_red_info.as_ref().unwrap();
        assert_eq!(red.id, 7);
        assert_eq!(red.matches.len(), 2);
        assert!(data.fighter_blue_info.is_none());
        assert!(data.fighters().is_none());
    }

    #[test]
    fn test_exhibition_without_tier() {
        let json = r#"{
            "fighter_red": "A", "fighter_blue": "B",
            "match_format": "exhibition", "tier": null,
            "fighter_red_info": null, "fighter_blue_info": null
        }"#;
        let data: MatchData = serde_json::from_str(json).unwrap();
        assert_eq!(data.match_format, MatchFormat::Exhibition);
        assert!(data.tier.is_none());
    }

    #[test]
    fn test_average_bet_falls_back_to_stats() {
        let data: MatchData = serde_json::from_str(CURRENT_MATCH_JSON).unwrap();
        let mut red = data.fighter_red_info.unwrap();
        assert_eq!(red.average_bet(), 1200.5);
        red.average_bet_override = Some(10.0);
        assert_eq!(red.average_bet(), 10.0);
    }

    #[test]
    fn test_match_record_participants() {
        let record = MatchRecord {
            fighter_red: 1,
            fighter_blue: 2,
            bet_red: 10.0,
            bet_blue: 20.0,
            winner: 2,
        };
        assert!(record.is_between(1, 2));
        assert!(record.is_between(2, 1));
        assert!(!record.is_between(1, 3));
        assert_eq!(record.bet_on(2), Some(20.0));
        assert_eq!(record.bet_on(3), None);
        assert!(record.has_valid_winner());
    }

    #[test]
    fn test_format_and_tier_display() {
        assert_eq!(MatchFormat::Tournament.to_string(), "tournament");
        assert_eq!(Tier::P.to_string(), "P");
    }
}
