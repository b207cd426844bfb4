//! Aggregate statistics over a fighter's full match history.

use super::fighter::{FighterId, FighterInfo, FighterStats, MatchData, MatchRecord};

/// Rounds to two decimal places, the precision the backend reports.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Number of matches in `matches` won by `fighter`.
pub fn win_count(fighter: FighterId, matches: &[MatchRecord]) -> u32 {
    let wins = matches.iter().filter(|m| m.winner == fighter).count();
    u32::try_from(wins).unwrap_or(u32::MAX)
}

/// Derives [`FighterStats`] for `fighter` from its match list.
///
/// The average bet is the mean pot on whichever corner `fighter` held.
/// Both rates are `0` for a fighter with no matches.
pub fn fighter_stats(fighter: FighterId, matches: &[MatchRecord]) -> FighterStats {
    let total_matches = u32::try_from(matches.len()).unwrap_or(u32::MAX);
    if total_matches == 0 {
        return FighterStats::default();
    }

    let total_bet: f64 = matches
        .iter()
        .map(|m| {
            if m.fighter_blue == fighter {
                m.bet_blue
            } else {
                m.bet_red
            }
        })
        .sum();
    let n = f64::from(total_matches);

    FighterStats {
        total_matches,
        win_rate: round2(f64::from(win_count(fighter, matches)) / n),
        average_bet: round2(total_bet / n),
    }
}

/// Recomputes `stats` on both fighters from their match lists.
///
/// The backend's own aggregates can lag behind the history it serves.
pub fn refresh_stats(match_data: &mut MatchData) {
    let fighters = [&mut match_data.fighter_red_info, &mut match_data.fighter_blue_info];
    for info in fighters.into_iter().flatten() {
        refresh_fighter(info);
    }
}

fn refresh_fighter(info: &mut FighterInfo) {
    info.stats = fighter_stats(info.id, &info.matches);
}
