//! Franchise aggregates and the assembled dynasty profile.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::{AnalyticsConfig, EraConfig};
use crate::dominance::{FranchiseTotals, dominance_score, dynasty_index};
use crate::eras::{EraCard, detect_eras};
use crate::error::HistoryError;
use crate::hall::{HallOfSeasonEntry, hall_of_seasons};
use crate::history::{SeasonHistoryEntry, TeamId};
use crate::identity::{IdentityTagSet, identity_tags};
use crate::longevity::{LongevityProfile, longevity};
use crate::peak::{PeakPowerWindow, peak_power};

/// Everything derived for one franchise. Never persisted; recomputed
/// from history on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynastyProfile {
    pub team_id: TeamId,
    pub abbr: String,
    pub name: String,
    pub dynasty_index: u32,
    pub totals: FranchiseTotals,
    pub peak_power: PeakPowerWindow,
    pub longevity: LongevityProfile,
    /// Tags of the franchise's most dominant season.
    pub identity_tags: IdentityTagSet,
    pub era_cards: Vec<EraCard>,
    pub hall_of_seasons: Vec<HallOfSeasonEntry>,
}

/// Whether `team_id` finished `season` with the league's best winning
/// percentage. Every tied team counts.
fn led_league(season: &SeasonHistoryEntry, team_id: TeamId) -> bool {
    let Some(record) = season.record_for(team_id) else {
        return false;
    };
    let pct = record.win_pct();
    season
        .team_records
        .iter()
        .all(|other| other.win_pct() <= pct)
}

/// Lifetime aggregates for `team_id`. Awards are credited by matching the
/// winner's team abbreviation against the franchise's abbreviation that
/// season.
#[must_use]
pub fn franchise_totals(history: &[SeasonHistoryEntry], team_id: TeamId) -> FranchiseTotals {
    let mut totals = FranchiseTotals::default();
    let mut league_best = 0_u32;
    for season in history {
        let Some(record) = season.record_for(team_id) else {
            continue;
        };
        totals.seasons += 1;
        totals.wins += record.wins;
        totals.losses += record.losses;
        totals.playoff_wins += record.playoff_wins;
        if season.is_champion(team_id) {
            totals.titles += 1;
        }
        for (kind, winner) in season.awards.iter() {
            if winner.team != record.abbr {
                continue;
            }
            if kind.is_mvp() {
                totals.mvps += 1;
            } else if kind.is_cy_young() {
                totals.cy_youngs += 1;
            }
        }
        if led_league(season, team_id) {
            league_best += 1;
        }
    }
    totals.rivalry_dominance = f64::from(league_best);
    totals
}

/// Assemble the full profile for `team_id`.
///
/// # Errors
///
/// Returns [`HistoryError::UnknownTeam`] if the team never played a
/// recorded season.
pub fn dynasty_profile(
    history: &[SeasonHistoryEntry],
    team_id: TeamId,
    cfg: &AnalyticsConfig,
) -> Result<DynastyProfile, HistoryError> {
    let Some(latest) = history
        .iter()
        .rev()
        .find_map(|season| season.record_for(team_id))
    else {
        return Err(HistoryError::UnknownTeam { team_id });
    };

    let abbrs: BTreeSet<&str> = history
        .iter()
        .filter_map(|season| season.record_for(team_id))
        .map(|record| record.abbr.as_str())
        .collect();

    let mut best: Option<(u32, &SeasonHistoryEntry)> = None;
    for season in history {
        let Some(record) = season.record_for(team_id) else {
            continue;
        };
        let score = dominance_score(record, season);
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, season));
        }
    }
    let tags = best
        .and_then(|(_, season)| {
            season
                .record_for(team_id)
                .map(|record| identity_tags(record, season))
        })
        .unwrap_or_default();

    let uncapped = EraConfig {
        cap: usize::MAX,
        ..cfg.eras.clone()
    };
    let mut era_cards: Vec<EraCard> = detect_eras(history, &uncapped)
        .into_iter()
        .filter(|card| abbrs.contains(card.abbr.as_str()))
        .collect();
    era_cards.truncate(cfg.eras.cap);

    let hall = hall_of_seasons(history, &cfg.hall)
        .into_iter()
        .filter(|entry| entry.team_id == team_id)
        .collect();

    let totals = franchise_totals(history, team_id);
    Ok(DynastyProfile {
        team_id,
        abbr: latest.abbr.clone(),
        name: latest.name.clone(),
        dynasty_index: dynasty_index(&totals),
        totals,
        peak_power: peak_power(history, team_id, &cfg.peak),
        longevity: longevity(history, team_id),
        identity_tags: tags,
        era_cards,
        hall_of_seasons: hall,
    })
}
