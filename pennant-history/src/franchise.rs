//! Best single-season and career marks within one franchise.
use serde::{Deserialize, Serialize};

use crate::career::{CareerRecordStore, SeasonLogEntry};
use crate::config::RecordConfig;
use crate::history::PlayerId;
use crate::leaders::LeaderStat;

/// Stats tracked for single-season franchise records, in display order.
pub const SINGLE_SEASON_STATS: [LeaderStat; 9] = [
    LeaderStat::HomeRuns,
    LeaderStat::Rbi,
    LeaderStat::Hits,
    LeaderStat::Steals,
    LeaderStat::Average,
    LeaderStat::Wins,
    LeaderStat::Strikeouts,
    LeaderStat::Saves,
    LeaderStat::Era,
];

/// Counting stats tracked for franchise career totals.
pub const CAREER_STATS: [LeaderStat; 7] = [
    LeaderStat::HomeRuns,
    LeaderStat::Rbi,
    LeaderStat::Hits,
    LeaderStat::Steals,
    LeaderStat::Wins,
    LeaderStat::Strikeouts,
    LeaderStat::Saves,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranchiseRecord {
    pub stat: LeaderStat,
    pub player_id: PlayerId,
    pub name: String,
    /// The record season; absent for career totals.
    pub year: Option<u16>,
    /// Display value. ERA is shown as a plain (positive) number.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FranchiseRecordBook {
    pub abbr: String,
    pub single_season: Vec<FranchiseRecord>,
    pub career: Vec<FranchiseRecord>,
}

impl FranchiseRecordBook {
    #[must_use]
    pub fn single_season(&self, stat: LeaderStat) -> Option<&FranchiseRecord> {
        self.single_season.iter().find(|record| record.stat == stat)
    }

    #[must_use]
    pub fn career(&self, stat: LeaderStat) -> Option<&FranchiseRecord> {
        self.career.iter().find(|record| record.stat == stat)
    }
}

/// Per-stat slots holding the best comparable value seen so far.
///
/// Every comparison is `candidate > holder`. ERA enters pre-negated, so
/// the larger stored value is the lower ERA.
struct RecordTracker<const N: usize> {
    stats: [LeaderStat; N],
    best: [Option<FranchiseRecord>; N],
}

impl<const N: usize> RecordTracker<N> {
    fn new(stats: [LeaderStat; N]) -> Self {
        Self {
            stats,
            best: std::array::from_fn(|_| None),
        }
    }

    fn offer(
        &mut self,
        slot: usize,
        player_id: PlayerId,
        name: &str,
        year: Option<u16>,
        value: f64,
    ) {
        let replace = self.best[slot]
            .as_ref()
            .is_none_or(|holder| value > holder.value);
        if replace {
            self.best[slot] = Some(FranchiseRecord {
                stat: self.stats[slot],
                player_id,
                name: name.to_string(),
                year,
                value,
            });
        }
    }

    fn finish(self) -> Vec<FranchiseRecord> {
        self.best
            .into_iter()
            .flatten()
            .map(|mut record| {
                if record.stat == LeaderStat::Era {
                    record.value = -record.value;
                }
                record
            })
            .collect()
    }
}

/// Comparable single-season value, or `None` when the season cannot hold
/// the record. Counting stats need a non-zero value; rates need the
/// configured sample.
fn season_value(stat: LeaderStat, entry: &SeasonLogEntry, cfg: &RecordConfig) -> Option<f64> {
    let count = |value: u32| (value > 0).then(|| f64::from(value));
    match stat {
        LeaderStat::HomeRuns => count(entry.hr),
        LeaderStat::Rbi => count(entry.rbi),
        LeaderStat::Hits => count(entry.h),
        LeaderStat::Steals => count(entry.sb),
        LeaderStat::Runs => count(entry.r),
        LeaderStat::Wins => count(entry.w),
        LeaderStat::Strikeouts => count(entry.k),
        LeaderStat::Saves => count(entry.sv),
        LeaderStat::Average => (entry.ab >= cfg.franchise_min_ab).then_some(entry.avg),
        LeaderStat::Era => (entry.outs >= cfg.franchise_min_outs).then_some(-entry.era),
    }
}

#[derive(Default)]
struct FranchiseTotalsLine {
    hr: u32,
    rbi: u32,
    h: u32,
    sb: u32,
    w: u32,
    k: u32,
    sv: u32,
}

impl FranchiseTotalsLine {
    fn add(&mut self, entry: &SeasonLogEntry) {
        self.hr = self.hr.saturating_add(entry.hr);
        self.rbi = self.rbi.saturating_add(entry.rbi);
        self.h = self.h.saturating_add(entry.h);
        self.sb = self.sb.saturating_add(entry.sb);
        self.w = self.w.saturating_add(entry.w);
        self.k = self.k.saturating_add(entry.k);
        self.sv = self.sv.saturating_add(entry.sv);
    }

    const fn get(&self, stat: LeaderStat) -> u32 {
        match stat {
            LeaderStat::HomeRuns => self.hr,
            LeaderStat::Rbi => self.rbi,
            LeaderStat::Hits => self.h,
            LeaderStat::Steals => self.sb,
            LeaderStat::Wins => self.w,
            LeaderStat::Strikeouts => self.k,
            LeaderStat::Saves => self.sv,
            _ => 0,
        }
    }
}

/// Scan every career's season log for entries with `abbr` and keep the
/// best mark per stat. Earlier holders keep ties.
#[must_use]
pub fn franchise_records(
    careers: &CareerRecordStore,
    abbr: &str,
    cfg: &RecordConfig,
) -> FranchiseRecordBook {
    let mut seasons = RecordTracker::new(SINGLE_SEASON_STATS);
    let mut totals = RecordTracker::new(CAREER_STATS);

    for record in careers.iter() {
        let mut line = FranchiseTotalsLine::default();
        let mut played = false;
        for entry in record.season_log.iter().filter(|entry| entry.team == abbr) {
            played = true;
            line.add(entry);
            for (slot, stat) in SINGLE_SEASON_STATS.into_iter().enumerate() {
                if let Some(value) = season_value(stat, entry, cfg) {
                    seasons.offer(slot, record.player_id, &record.name, Some(entry.year), value);
                }
            }
        }
        if !played {
            continue;
        }
        for (slot, stat) in CAREER_STATS.into_iter().enumerate() {
            let total = line.get(stat);
            if total > 0 {
                totals.offer(slot, record.player_id, &record.name, None, f64::from(total));
            }
        }
    }

    FranchiseRecordBook {
        abbr: abbr.to_string(),
        single_season: seasons.finish(),
        career: totals.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::SeasonStatLine;
    use crate::career::tests::{hitter_line, pitcher_line};
    use crate::history::SeasonAwards;

    fn ingest(store: &mut CareerRecordStore, year: u16, lines: &[SeasonStatLine]) {
        store
            .record_season_stats(year, lines, &SeasonAwards::default())
            .unwrap();
    }

    #[test]
    fn lower_era_takes_the_record() {
        let mut store = CareerRecordStore::new();
        ingest(
            &mut store,
            2001,
            &[
                pitcher_line(1, 2001, "ATL"),
                SeasonStatLine {
                    er: 50,
                    ..pitcher_line(2, 2001, "ATL")
                },
            ],
        );
        let book = franchise_records(&store, "ATL", &RecordConfig::default());
        let era = book.single_season(LeaderStat::Era).unwrap();
        assert_eq!(era.player_id, 2);
        assert!((era.value - 2.25).abs() < 1e-9);
    }

    #[test]
    fn rate_records_need_a_full_season() {
        let mut store = CareerRecordStore::new();
        ingest(
            &mut store,
            2001,
            &[
                SeasonStatLine {
                    ab: 120,
                    h: 60,
                    ..hitter_line(1, 2001, "SEA")
                },
                SeasonStatLine {
                    outs: 120,
                    er: 2,
                    ..pitcher_line(2, 2001, "SEA")
                },
            ],
        );
        let book = franchise_records(&store, "SEA", &RecordConfig::default());
        assert!(book.single_season(LeaderStat::Average).is_none());
        assert!(book.single_season(LeaderStat::Era).is_none());
        assert!(book.single_season(LeaderStat::Hits).is_some());
    }

    #[test]
    fn only_seasons_with_the_franchise_count() {
        let mut store = CareerRecordStore::new();
        ingest(
            &mut store,
            2001,
            &[SeasonStatLine {
                hr: 50,
                ..hitter_line(1, 2001, "CHC")
            }],
        );
        ingest(
            &mut store,
            2002,
            &[SeasonStatLine {
                hr: 20,
                ..hitter_line(1, 2002, "STL")
            }],
        );
        let cubs = franchise_records(&store, "CHC", &RecordConfig::default());
        let cards = franchise_records(&store, "STL", &RecordConfig::default());
        assert_eq!(cubs.single_season(LeaderStat::HomeRuns).unwrap().year, Some(2001));
        assert!((cards.career(LeaderStat::HomeRuns).unwrap().value - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ties_stay_with_the_first_holder() {
        let mut store = CareerRecordStore::new();
        ingest(
            &mut store,
            2001,
            &[hitter_line(1, 2001, "BOS"), hitter_line(2, 2001, "BOS")],
        );
        let book = franchise_records(&store, "BOS", &RecordConfig::default());
        assert_eq!(book.single_season(LeaderStat::HomeRuns).unwrap().player_id, 1);
        assert_eq!(book.career(LeaderStat::Rbi).unwrap().player_id, 1);
    }

    #[test]
    fn career_totals_accumulate_across_franchise_seasons() {
        let mut store = CareerRecordStore::new();
        for year in 2001..=2003 {
            ingest(&mut store, year, &[pitcher_line(7, year, "LAD")]);
        }
        let book = franchise_records(&store, "LAD", &RecordConfig::default());
        let wins = book.career(LeaderStat::Wins).unwrap();
        assert!((wins.value - 45.0).abs() < f64::EPSILON);
        assert_eq!(wins.year, None);
        assert!(book.career(LeaderStat::Saves).is_none());
    }

    #[test]
    fn unknown_franchise_is_empty() {
        let store = CareerRecordStore::new();
        let book = franchise_records(&store, "XXX", &RecordConfig::default());
        assert!(book.single_season.is_empty());
        assert!(book.career.is_empty());
    }
}
