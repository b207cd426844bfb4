//! Bet recommendation and wager types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Corner to bet on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Blue,
}

impl Colour {
    /// The opposite corner.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Blue => write!(f, "blue"),
        }
    }
}

/// Output of a strategy: which corner, and how strongly.
///
/// `confidence` is `None` exactly when the strategy had no opinion,
/// otherwise a belief in `[0, 1]` that `colour` wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetData {
    pub colour: Colour,
    pub confidence: Option<f64>,
}

impl BetData {
    /// Recommendation with an explicit confidence.
    pub const fn new(colour: Colour, confidence: f64) -> Self {
        Self {
            colour,
            confidence: Some(confidence),
        }
    }

    /// The "no data" fallback: red, no opinion.
    pub const fn no_data() -> Self {
        Self {
            colour: Colour::Red,
            confidence: None,
        }
    }

    /// Same confidence, opposite corner.
    pub const fn inverted(self) -> Self {
        Self {
            colour: self.colour.flipped(),
            confidence: self.confidence,
        }
    }
}

/// Final stake produced by the sizing policy.
///
/// Serializes as a plain number, or `""` for no bet, which is what the
/// wager input field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wager {
    Amount(u64),
    NoBet,
}

impl Wager {
    /// The stake, if any.
    pub const fn amount(self) -> Option<u64> {
        match self {
            Self::Amount(amount) => Some(amount),
            Self::NoBet => None,
        }
    }

    pub const fn is_bet(self) -> bool {
        matches!(self, Self::Amount(_))
    }
}

impl std::fmt::Display for Wager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amount(amount) => write!(f, "{amount}"),
            Self::NoBet => Ok(()),
        }
    }
}

impl Serialize for Wager {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Amount(amount) => serializer.serialize_u64(*amount),
            Self::NoBet => serializer.serialize_str(""),
        }
    }
}

impl<'de> Deserialize<'de> for Wager {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Amount(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Amount(amount) => Ok(Self::Amount(amount)),
            Raw::Text(text) if text.is_empty() => Ok(Self::NoBet),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "expected a wager amount or \"\", got {text:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_flip() {
        assert_eq!(Colour::Red.flipped(), Colour::Blue);
        assert_eq!(Colour::Blue.flipped().flipped(), Colour::Blue);
    }

    #[test]
    fn test_inverted_keeps_confidence() {
        let bet = BetData::new(Colour::Red, 0.7).inverted();
        assert_eq!(bet.colour, Colour::Blue);
        assert_eq!(bet.confidence, Some(0.7));
        assert_eq!(BetData::no_data().inverted().confidence, None);
    }

    #[test]
    fn test_wager_wire_format() {
        assert_eq!(serde_json::to_string(&Wager::Amount(40)).unwrap(), "40");
        assert_eq!(serde_json::to_string(&Wager::NoBet).unwrap(), "\"\"");
        assert_eq!(serde_json::from_str::<Wager>("80").unwrap(), Wager::Amount(80));
        assert_eq!(serde_json::from_str::<Wager>("\"\"").unwrap(), Wager::NoBet);
        assert!(serde_json::from_str::<Wager>("\"x\"").is_err());
    }

    #[test]
    fn test_wager_display() {
        assert_eq!(Wager::Amount(12).to_string(), "12");
        assert_eq!(Wager::NoBet.to_string(), "");
    }
}
