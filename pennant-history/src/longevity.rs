//! Consistency across every season a franchise has played.
use serde::{Deserialize, Serialize};

use crate::constants::{
    LONGEVITY_AVG_DOMINANCE_WEIGHT, LONGEVITY_PLAYOFF_WEIGHT, LONGEVITY_WINNING_SEASON_WEIGHT,
};
use crate::dominance::dominance_score;
use crate::history::{SeasonHistoryEntry, TeamId};
use crate::numbers::{guarded_ratio, round_f64_to_u32, u64_to_f64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LongevityProfile {
    pub score: u32,
    pub winning_seasons: u32,
    pub playoff_appearances: u32,
    /// Share of seasons with a winning record, 0-100.
    pub consistency: u32,
}

#[must_use]
pub fn longevity(history: &[SeasonHistoryEntry], team_id: TeamId) -> LongevityProfile {
    let mut total_seasons = 0_u32;
    let mut winning_seasons = 0_u32;
    let mut playoff_appearances = 0_u32;
    let mut total_dominance = 0_u64;

    for season in history {
        let Some(record) = season.record_for(team_id) else {
            continue;
        };
        total_seasons += 1;
        if record.is_winning() {
            winning_seasons += 1;
        }
        if record.made_playoffs() {
            playoff_appearances += 1;
        }
        total_dominance += u64::from(dominance_score(record, season));
    }

    if total_seasons == 0 {
        return LongevityProfile::default();
    }

    let avg_dominance = u64_to_f64(total_dominance) / f64::from(total_seasons);
    let consistency = round_f64_to_u32(guarded_ratio(winning_seasons, total_seasons) * 100.0);
    let score = round_f64_to_u32(
        avg_dominance * LONGEVITY_AVG_DOMINANCE_WEIGHT
            + f64::from(winning_seasons) * LONGEVITY_WINNING_SEASON_WEIGHT
            + f64::from(playoff_appearances) * LONGEVITY_PLAYOFF_WEIGHT,
    );

    LongevityProfile {
        score,
        winning_seasons,
        playoff_appearances,
        consistency,
    }
}
