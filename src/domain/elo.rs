//! Elo win probability.
//!
//! What the `elo` and `eloTier` strategies bet on. Ratings themselves are
//! maintained by the ingestion side and arrive with the fighter info.

/// Probability that a fighter rated `rating` beats one rated `opponent`.
///
/// Equal ratings yield exactly `0.5`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}
