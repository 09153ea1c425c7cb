//! Career milestone detection.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::career::{CareerRecord, CareerRecordStore, SeasonLogEntry};
use crate::history::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStat {
    Hits,
    HomeRuns,
    Rbi,
    Steals,
    Wins,
    Strikeouts,
    Saves,
}

impl MilestoneStat {
    #[must_use]
    pub const fn thresholds(self) -> &'static [u32] {
        match self {
            Self::Hits => &[2000, 3000],
            Self::HomeRuns => &[300, 400, 500, 600],
            Self::Rbi => &[1500, 2000],
            Self::Steals => &[500],
            Self::Wins => &[200, 300],
            Self::Strikeouts => &[2500, 3000],
            Self::Saves => &[300, 500],
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hits => "hits",
            Self::HomeRuns => "home runs",
            Self::Rbi => "RBI",
            Self::Steals => "stolen bases",
            Self::Wins => "wins",
            Self::Strikeouts => "strikeouts",
            Self::Saves => "saves",
        }
    }

    const fn career_value(self, record: &CareerRecord) -> u32 {
        match self {
            Self::Hits => record.h,
            Self::HomeRuns => record.hr,
            Self::Rbi => record.rbi,
            Self::Steals => record.sb,
            Self::Wins => record.w,
            Self::Strikeouts => record.k,
            Self::Saves => record.sv,
        }
    }

    const fn season_value(self, entry: &SeasonLogEntry) -> u32 {
        match self {
            Self::Hits => entry.h,
            Self::HomeRuns => entry.hr,
            Self::Rbi => entry.rbi,
            Self::Steals => entry.sb,
            Self::Wins => entry.w,
            Self::Strikeouts => entry.k,
            Self::Saves => entry.sv,
        }
    }
}

pub const MILESTONE_STATS: [MilestoneStat; 7] = [
    MilestoneStat::Hits,
    MilestoneStat::HomeRuns,
    MilestoneStat::Rbi,
    MilestoneStat::Steals,
    MilestoneStat::Wins,
    MilestoneStat::Strikeouts,
    MilestoneStat::Saves,
];

impl fmt::Display for MilestoneStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub player_id: PlayerId,
    pub name: String,
    pub year: u16,
    pub stat: MilestoneStat,
    pub threshold: u32,
    /// Team the player was with when the mark fell.
    pub team: String,
}

/// Chronological milestone log, bounded by a retention limit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MilestoneLog {
    entries: Vec<Milestone>,
    /// Every (player, stat, threshold) ever logged, including entries
    /// since dropped by the retention limit.
    reached: BTreeSet<(PlayerId, MilestoneStat, u32)>,
}

impl MilestoneLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            reached: BTreeSet::new(),
        }
    }

    /// Record every threshold crossed during `year` that has not been
    /// logged before, then trim to `limit`. Returns the new milestones.
    pub fn check(
        &mut self,
        careers: &CareerRecordStore,
        year: u16,
        limit: usize,
    ) -> Vec<Milestone> {
        let mut found = Vec::new();
        for record in careers.iter() {
            let season: Vec<&SeasonLogEntry> = record
                .season_log
                .iter()
                .filter(|entry| entry.year == year)
                .collect();
            let Some(last_stint) = season.last() else {
                continue;
            };
            for stat in MILESTONE_STATS {
                let after = stat.career_value(record);
                let during = season
                    .iter()
                    .fold(0_u32, |sum, entry| sum.saturating_add(stat.season_value(entry)));
                let before = after.saturating_sub(during);
                for &threshold in stat.thresholds() {
                    if before >= threshold || after < threshold {
                        continue;
                    }
                    if !self.reached.insert((record.player_id, stat, threshold)) {
                        continue;
                    }
                    found.push(Milestone {
                        player_id: record.player_id,
                        name: record.name.clone(),
                        year,
                        stat,
                        threshold,
                        team: last_stint.team.clone(),
                    });
                }
            }
        }
        for milestone in &found {
            log::debug!(
                "milestone: {} reached {} {} in {}",
                milestone.name,
                milestone.threshold,
                milestone.stat,
                milestone.year
            );
        }
        self.entries.extend(found.iter().cloned());
        if self.entries.len() > limit {
            let excess = self.entries.len() - limit;
            self.entries.drain(..excess);
        }
        found
    }

    /// Retained milestones, most recent first.
    #[must_use]
    pub fn recent(&self) -> Vec<Milestone> {
        self.entries.iter().rev().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::SeasonStatLine;
    use crate::career::tests::{hitter_line, pitcher_line};
    use crate::history::SeasonAwards;

    fn slugger(year: u16) -> SeasonStatLine {
        SeasonStatLine {
            hr: 45,
            ..hitter_line(1, year, "NYY")
        }
    }

    #[test]
    fn crossing_is_logged_in_the_season_it_happens() {
        let mut store = CareerRecordStore::new();
        let mut log = MilestoneLog::new();
        // 45 per season: 270 after six, 315 after seven.
        for year in 2001..=2007 {
            store
                .record_season_stats(year, &[slugger(year)], &SeasonAwards::default())
                .unwrap();
            let found = log.check(&store, year, 200);
            if year < 2007 {
                assert!(found.is_empty(), "unexpected milestone in {year}");
            } else {
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].stat, MilestoneStat::HomeRuns);
                assert_eq!(found[0].threshold, 300);
                assert_eq!(found[0].team, "NYY");
            }
        }
    }

    #[test]
    fn repeated_checks_are_idempotent() {
        let mut store = CareerRecordStore::new();
        let mut log = MilestoneLog::new();
        for year in 2001..=2007 {
            store
                .record_season_stats(year, &[slugger(year)], &SeasonAwards::default())
                .unwrap();
        }
        assert_eq!(log.check(&store, 2007, 200).len(), 1);
        assert!(log.check(&store, 2007, 200).is_empty());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn one_big_season_can_cross_several_thresholds() {
        let mut store = CareerRecordStore::new();
        let mut log = MilestoneLog::new();
        let monster = SeasonStatLine {
            w: 320,
            k: 3100,
            ..pitcher_line(9, 2001, "ATL")
        };
        store
            .record_season_stats(2001, &[monster], &SeasonAwards::default())
            .unwrap();
        let found = log.check(&store, 2001, 200);
        let marks: Vec<(MilestoneStat, u32)> =
            found.iter().map(|m| (m.stat, m.threshold)).collect();
        assert_eq!(
            marks,
            vec![
                (MilestoneStat::Wins, 200),
                (MilestoneStat::Wins, 300),
                (MilestoneStat::Strikeouts, 2500),
                (MilestoneStat::Strikeouts, 3000),
            ]
        );
    }

    #[test]
    fn retention_drops_the_oldest() {
        let mut store = CareerRecordStore::new();
        let mut log = MilestoneLog::new();
        let monster = SeasonStatLine {
            w: 320,
            k: 3100,
            ..pitcher_line(9, 2001, "ATL")
        };
        store
            .record_season_stats(2001, &[monster], &SeasonAwards::default())
            .unwrap();
        log.check(&store, 2001, 3);
        let recent = log.recent();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].threshold, 3000);
        assert_eq!(recent[2].threshold, 300);
        assert!(log.check(&store, 2001, 3).is_empty());
    }
}
