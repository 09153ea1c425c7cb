//! Single-season dominance scoring and the lifetime dynasty index.
use serde::{Deserialize, Serialize};

use crate::constants::{
    DOMINANCE_CHAMPION_BONUS, DOMINANCE_LOSING_PENALTY, DOMINANCE_PLAYOFF_WIN_WEIGHT,
    DOMINANCE_RANK_BONUS_CUTOFF, DOMINANCE_RANK_BONUS_STEP, DOMINANCE_RANK_BONUS_TOP,
    DOMINANCE_RUN_DIFF_DIVISOR, DOMINANCE_WIN_WEIGHT, DYNASTY_CY_YOUNG_WEIGHT,
    DYNASTY_MVP_WEIGHT, DYNASTY_PLAYOFF_WIN_WEIGHT, DYNASTY_RIVALRY_WEIGHT,
    DYNASTY_TITLE_WEIGHT, DYNASTY_WIN_PCT_WEIGHT,
};
use crate::history::{SeasonHistoryEntry, SeasonTeamRecord};
use crate::numbers::{
    clamp_i64_to_u32, guarded_ratio, i64_to_f64, round_f64_to_i64, round_f64_to_u32,
};

const fn unit_rank_bonus(rank: u8) -> i64 {
    if rank >= 1 && rank <= DOMINANCE_RANK_BONUS_CUTOFF {
        DOMINANCE_RANK_BONUS_TOP - (rank as i64 - 1) * DOMINANCE_RANK_BONUS_STEP
    } else {
        0
    }
}

/// Composite strength of one team-season. Never negative.
///
/// Run differential only ever adds: a negative differential is already
/// reflected by the losing-season penalty.
#[must_use]
pub fn dominance_score(record: &SeasonTeamRecord, season: &SeasonHistoryEntry) -> u32 {
    let mut score = i64::from(record.wins) * DOMINANCE_WIN_WEIGHT;
    if season.is_champion(record.team_id) {
        score += DOMINANCE_CHAMPION_BONUS;
    }
    score += i64::from(record.playoff_wins) * DOMINANCE_PLAYOFF_WIN_WEIGHT;

    let run_diff = record.run_differential();
    if run_diff > 0 {
        let scaled = i64_to_f64(run_diff) / DOMINANCE_RUN_DIFF_DIVISOR;
        score += round_f64_to_i64(scaled);
    }

    score += unit_rank_bonus(record.offense_rank);
    score += unit_rank_bonus(record.pitching_rank);

    if record.losses > record.wins {
        score -= DOMINANCE_LOSING_PENALTY;
    }
    clamp_i64_to_u32(score)
}

/// Dominance for `team_id` in `season`, zero when the team has no record.
#[must_use]
pub fn season_dominance(season: &SeasonHistoryEntry, team_id: u32) -> u32 {
    season
        .record_for(team_id)
        .map_or(0, |record| dominance_score(record, season))
}

/// Lifetime franchise aggregates feeding the dynasty index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FranchiseTotals {
    pub seasons: u32,
    pub wins: u32,
    pub losses: u32,
    pub titles: u32,
    pub playoff_wins: u32,
    pub mvps: u32,
    pub cy_youngs: u32,
    pub rivalry_dominance: f64,
}

impl FranchiseTotals {
    #[must_use]
    pub fn win_pct(&self) -> f64 {
        guarded_ratio(self.wins, self.wins.saturating_add(self.losses))
    }
}

/// One number summarizing a franchise's sustained success; zero for a
/// franchise that has never played.
#[must_use]
pub fn dynasty_index(totals: &FranchiseTotals) -> u32 {
    if totals.seasons < 1 {
        return 0;
    }
    let raw = f64::from(totals.titles) * DYNASTY_TITLE_WEIGHT
        + f64::from(totals.playoff_wins) * DYNASTY_PLAYOFF_WIN_WEIGHT
        + totals.win_pct() * DYNASTY_WIN_PCT_WEIGHT * f64::from(totals.seasons)
        + f64::from(totals.mvps) * DYNASTY_MVP_WEIGHT
        + f64::from(totals.cy_youngs) * DYNASTY_CY_YOUNG_WEIGHT
        + totals.rivalry_dominance * DYNASTY_RIVALRY_WEIGHT;
    round_f64_to_u32(raw)
}
