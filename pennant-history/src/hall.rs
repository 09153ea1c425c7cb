//! The Hall of Seasons: every team-season ever played, ranked by dominance.
use serde::{Deserialize, Serialize};

use crate::config::HallConfig;
use crate::constants::{
    PLAQUE_DOMINANT_WINS, PLAQUE_ELITE_WINS, PLAQUE_MAX_DESCRIPTORS, PLAQUE_RUN_DIFF_CALLOUT,
    PLAQUE_SEPARATOR,
};
use crate::dominance::dominance_score;
use crate::history::{AwardKind, PlayerId, SeasonHistoryEntry, SeasonTeamRecord, TeamId};
use crate::identity::{IdentityTagSet, identity_tags};

/// Award priority for the single badge shown on an entry.
const TOP_PLAYER_PRIORITY: [AwardKind; 4] = [
    AwardKind::MvpAl,
    AwardKind::MvpNl,
    AwardKind::CyYoungAl,
    AwardKind::CyYoungNl,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPlayerBadge {
    pub player_id: PlayerId,
    pub name: String,
    pub award: AwardKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallOfSeasonEntry {
    pub year: u16,
    pub team_id: TeamId,
    pub abbr: String,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub run_differential: i64,
    pub dominance: u32,
    pub champion: bool,
    pub top_player: Option<TopPlayerBadge>,
    pub tags: IdentityTagSet,
    pub plaque: String,
}

fn top_player(record: &SeasonTeamRecord, season: &SeasonHistoryEntry) -> Option<TopPlayerBadge> {
    TOP_PLAYER_PRIORITY.into_iter().find_map(|award| {
        season
            .awards
            .get(award)
            .filter(|winner| winner.team == record.abbr)
            .map(|winner| TopPlayerBadge {
                player_id: winner.player_id,
                name: winner.name.clone(),
                award,
            })
    })
}

fn record_descriptor(wins: u32, losses: u32) -> String {
    if wins >= PLAQUE_DOMINANT_WINS {
        format!("Dominant {wins}-{losses}")
    } else if wins >= PLAQUE_ELITE_WINS {
        format!("Elite {wins}-{losses}")
    } else {
        format!("{wins}-{losses}")
    }
}

/// Human-readable summary; descriptors appear in fixed order and at most
/// four are kept.
fn plaque(
    record: &SeasonTeamRecord,
    champion: bool,
    dominance: u32,
    top: Option<&TopPlayerBadge>,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(PLAQUE_MAX_DESCRIPTORS + 3);
    if champion {
        parts.push("World Series Champions".to_string());
    }
    if record.offense_rank == 1 {
        parts.push("#1 Offense".to_string());
    }
    if record.pitching_rank == 1 {
        parts.push("#1 Pitching".to_string());
    }
    parts.push(record_descriptor(record.wins, record.losses));
    parts.push(format!("Dominance {dominance}"));
    if let Some(badge) = top {
        parts.push(format!("{} ({})", badge.name, badge.award.label()));
    }
    let run_diff = record.run_differential();
    if run_diff >= PLAQUE_RUN_DIFF_CALLOUT {
        parts.push(format!("+{run_diff} Run Differential"));
    }
    parts.truncate(PLAQUE_MAX_DESCRIPTORS);
    parts.join(PLAQUE_SEPARATOR)
}

fn hall_entry(record: &SeasonTeamRecord, season: &SeasonHistoryEntry) -> HallOfSeasonEntry {
    let dominance = dominance_score(record, season);
    let champion = season.is_champion(record.team_id);
    let top = top_player(record, season);
    let plaque = plaque(record, champion, dominance, top.as_ref());
    HallOfSeasonEntry {
        year: season.year,
        team_id: record.team_id,
        abbr: record.abbr.clone(),
        team_name: record.name.clone(),
        wins: record.wins,
        losses: record.losses,
        run_differential: record.run_differential(),
        dominance,
        champion,
        top_player: top,
        tags: identity_tags(record, season),
        plaque,
    }
}

/// Rank every team-season by dominance and keep the top `cfg.size`.
/// Equal scores keep chronological order.
#[must_use]
pub fn hall_of_seasons(
    history: &[SeasonHistoryEntry],
    cfg: &HallConfig,
) -> Vec<HallOfSeasonEntry> {
    let mut entries: Vec<HallOfSeasonEntry> = history
        .iter()
        .flat_map(|season| {
            season
                .team_records
                .iter()
                .map(move |record| hall_entry(record, season))
        })
        .collect();
    entries.sort_by(|a, b| b.dominance.cmp(&a.dominance));
    entries.truncate(cfg.size);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::tests::{season, team, winner};
    use crate::identity::IdentityTag;

    #[test]
    fn mvp_outranks_cy_young_for_the_badge() {
        let record = team(1, "NYY", 98, 64);
        let mut entry = season(1998, vec![record.clone()]);
        entry.awards.set(AwardKind::CyYoungAl, winner(2, "Ace", "NYY"));
        entry.awards.set(AwardKind::MvpNl, winner(3, "Slugger", "NYY"));
        let badge = top_player(&record, &entry).unwrap();
        assert_eq!(badge.award, AwardKind::MvpNl);
        assert_eq!(badge.name, "Slugger");
    }

    #[test]
    fn plaque_caps_at_four_descriptors() {
        let record = SeasonTeamRecord {
            runs_scored: 965,
            runs_allowed: 656,
            offense_rank: 1,
            pitching_rank: 1,
            playoff_wins: 11,
            ..team(1, "NYY", 114, 48)
        };
        let mut entry = season(1998, vec![record.clone()]);
        entry.champion_id = Some(1);
        let hall = hall_of_seasons(&[entry], &HallConfig::default());
        assert_eq!(
            hall[0].plaque,
            "World Series Champions · #1 Offense · #1 Pitching · Dominant 114-48"
        );
    }

    #[test]
    fn plaque_reaches_run_differential_when_room_remains() {
        let record = SeasonTeamRecord {
            runs_scored: 800,
            runs_allowed: 690,
            ..team(1, "CLE", 90, 72)
        };
        let entry = season(2016, vec![record]);
        let hall = hall_of_seasons(&[entry], &HallConfig::default());
        assert_eq!(hall[0].dominance, 202);
        assert_eq!(hall[0].plaque, "90-72 · Dominance 202 · +110 Run Differential");
    }

    #[test]
    fn ranks_league_wide_and_keeps_top_entries() {
        let mut history = Vec::new();
        for year in 2001..=2010_u16 {
            let records = ["AAA", "BBB", "CCC"]
                .into_iter()
                .zip(0_u32..)
                .map(|(abbr, i)| team(i, abbr, 80 + i * 5 + u32::from(year % 7), 82))
                .collect();
            history.push(season(year, records));
        }
        let hall = hall_of_seasons(&history, &HallConfig::default());
        assert_eq!(hall.len(), 20);
        assert!(hall.windows(2).all(|w| w[0].dominance >= w[1].dominance));
        assert_eq!(hall[0].abbr, "CCC");
    }

    #[test]
    fn entries_carry_identity_tags() {
        let record = SeasonTeamRecord {
            pitching_rank: 1,
            ..team(1, "ATL", 101, 61)
        };
        let entry = season(1995, vec![record]);
        let hall = hall_of_seasons(&[entry], &HallConfig::default());
        assert_eq!(
            hall[0].tags.as_slice(),
            &[
                IdentityTag::PitchingFactory,
                IdentityTag::Juggernaut,
                IdentityTag::Powerhouse
            ]
        );
    }
}
