//! Cumulative player careers built from per-season stat lines.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{INGEST_MIN_OUTS, INGEST_MIN_PA, OUTS_PER_NINE};
use crate::error::HistoryError;
use crate::history::{PlayerId, SeasonAwards};

/// One player's counting stats for a single season, as produced by the
/// simulation. Hitting and pitching fields coexist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonStatLine {
    pub player_id: PlayerId,
    pub year: u16,
    pub name: String,
    /// Team abbreviation the line was accumulated for.
    pub team: String,
    pub position: String,
    pub is_pitcher: bool,
    pub g: u32,
    pub pa: u32,
    pub ab: u32,
    pub h: u32,
    pub doubles: u32,
    pub triples: u32,
    pub hr: u32,
    pub rbi: u32,
    pub bb: u32,
    pub so: u32,
    pub sb: u32,
    pub r: u32,
    pub w: u32,
    pub l: u32,
    pub sv: u32,
    pub gs: u32,
    pub outs: u32,
    pub h_allowed: u32,
    pub er: u32,
    pub bb_allowed: u32,
    pub k: u32,
}

impl SeasonStatLine {
    /// Lines below both playing-time gates never reach a career.
    #[must_use]
    pub const fn meets_playing_time(&self) -> bool {
        !(self.pa < INGEST_MIN_PA && self.outs < INGEST_MIN_OUTS)
    }
}

/// Batting average, zero without at-bats.
#[must_use]
pub fn batting_average(h: u32, ab: u32) -> f64 {
    if ab > 0 {
        f64::from(h) / f64::from(ab)
    } else {
        0.0
    }
}

/// Earned run average over nine innings, zero without outs recorded.
#[must_use]
pub fn earned_run_average(er: u32, outs: u32) -> f64 {
    if outs > 0 {
        f64::from(er) / f64::from(outs) * OUTS_PER_NINE
    } else {
        0.0
    }
}

/// Season entry kept in a career log, with rates frozen at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonLogEntry {
    pub year: u16,
    pub team: String,
    pub g: u32,
    pub pa: u32,
    pub ab: u32,
    pub h: u32,
    pub hr: u32,
    pub rbi: u32,
    pub sb: u32,
    pub r: u32,
    pub avg: f64,
    pub w: u32,
    pub l: u32,
    pub sv: u32,
    pub outs: u32,
    pub k: u32,
    pub era: f64,
    #[serde(default)]
    pub awards: Vec<String>,
}

impl SeasonLogEntry {
    fn from_line(line: &SeasonStatLine, awards: Vec<String>) -> Self {
        Self {
            year: line.year,
            team: line.team.clone(),
            g: line.g,
            pa: line.pa,
            ab: line.ab,
            h: line.h,
            hr: line.hr,
            rbi: line.rbi,
            sb: line.sb,
            r: line.r,
            avg: batting_average(line.h, line.ab),
            w: line.w,
            l: line.l,
            sv: line.sv,
            outs: line.outs,
            k: line.k,
            era: earned_run_average(line.er, line.outs),
            awards,
        }
    }
}

/// Lifetime record for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub is_pitcher: bool,
    pub seasons: u32,
    pub first_year: u16,
    pub last_year: u16,
    pub g: u32,
    pub pa: u32,
    pub ab: u32,
    pub h: u32,
    pub doubles: u32,
    pub triples: u32,
    pub hr: u32,
    pub rbi: u32,
    pub bb: u32,
    pub so: u32,
    pub sb: u32,
    pub r: u32,
    pub w: u32,
    pub l: u32,
    pub sv: u32,
    pub gs: u32,
    pub outs: u32,
    pub h_allowed: u32,
    pub er: u32,
    pub bb_allowed: u32,
    pub k: u32,
    #[serde(default)]
    pub season_log: Vec<SeasonLogEntry>,
    #[serde(default)]
    pub hof_eligible: bool,
    #[serde(default)]
    pub hof_inducted: bool,
    #[serde(default)]
    pub hof_year: Option<u16>,
    #[serde(default)]
    pub hof_vote_pct: Option<f64>,
}

impl CareerRecord {
    fn new(line: &SeasonStatLine) -> Self {
        Self {
            player_id: line.player_id,
            name: line.name.clone(),
            position: line.position.clone(),
            is_pitcher: line.is_pitcher,
            seasons: 0,
            first_year: line.year,
            last_year: line.year,
            g: 0,
            pa: 0,
            ab: 0,
            h: 0,
            doubles: 0,
            triples: 0,
            hr: 0,
            rbi: 0,
            bb: 0,
            so: 0,
            sb: 0,
            r: 0,
            w: 0,
            l: 0,
            sv: 0,
            gs: 0,
            outs: 0,
            h_allowed: 0,
            er: 0,
            bb_allowed: 0,
            k: 0,
            season_log: Vec::new(),
            hof_eligible: false,
            hof_inducted: false,
            hof_year: None,
            hof_vote_pct: None,
        }
    }

    fn absorb(&mut self, line: &SeasonStatLine) {
        self.g = self.g.saturating_add(line.g);
        self.pa = self.pa.saturating_add(line.pa);
        self.ab = self.ab.saturating_add(line.ab);
        self.h = self.h.saturating_add(line.h);
        self.doubles = self.doubles.saturating_add(line.doubles);
        self.triples = self.triples.saturating_add(line.triples);
        self.hr = self.hr.saturating_add(line.hr);
        self.rbi = self.rbi.saturating_add(line.rbi);
        self.bb = self.bb.saturating_add(line.bb);
        self.so = self.so.saturating_add(line.so);
        self.sb = self.sb.saturating_add(line.sb);
        self.r = self.r.saturating_add(line.r);

        self.w = self.w.saturating_add(line.w);
        self.l = self.l.saturating_add(line.l);
        self.sv = self.sv.saturating_add(line.sv);
        self.gs = self.gs.saturating_add(line.gs);
        self.outs = self.outs.saturating_add(line.outs);
        self.h_allowed = self.h_allowed.saturating_add(line.h_allowed);
        self.er = self.er.saturating_add(line.er);
        self.bb_allowed = self.bb_allowed.saturating_add(line.bb_allowed);
        self.k = self.k.saturating_add(line.k);

        // Split seasons (traded mid-year) log one entry per team but count once.
        if self
            .season_log
            .last()
            .is_none_or(|entry| entry.year != line.year)
        {
            self.seasons = self.seasons.saturating_add(1);
        }
        self.first_year = self.first_year.min(line.year);
        self.last_year = self.last_year.max(line.year);
        // Names and positions drift over a career; keep the latest.
        self.name.clone_from(&line.name);
        self.position.clone_from(&line.position);
        self.is_pitcher = line.is_pitcher;
    }

    #[must_use]
    pub fn avg(&self) -> f64 {
        batting_average(self.h, self.ab)
    }

    #[must_use]
    pub fn era(&self) -> f64 {
        earned_run_average(self.er, self.outs)
    }

    #[must_use]
    pub fn innings_pitched(&self) -> f64 {
        f64::from(self.outs) / crate::constants::OUTS_PER_INNING
    }

    /// The log entry for `year`, if the player qualified that season.
    #[must_use]
    pub fn season(&self, year: u16) -> Option<&SeasonLogEntry> {
        self.season_log.iter().find(|entry| entry.year == year)
    }
}

/// A permanent Hall of Fame induction waiting to be committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HofInduction {
    pub player_id: PlayerId,
    pub year: u16,
    pub vote_pct: f64,
}

/// Summary of a season's ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Every player's career, keyed by player id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerRecordStore {
    records: BTreeMap<PlayerId, CareerRecord>,
}

impl CareerRecordStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Check every line belongs to `year` without touching the store.
    ///
    /// # Errors
    ///
    /// Returns the first line whose year differs.
    pub fn check_season(year: u16, lines: &[SeasonStatLine]) -> Result<(), HistoryError> {
        if let Some(line) = lines.iter().find(|line| line.year != year) {
            return Err(HistoryError::StatLineYearMismatch {
                player_id: line.player_id,
                expected: year,
                found: line.year,
            });
        }
        Ok(())
    }

    /// Fold one season of stat lines into careers.
    ///
    /// # Errors
    ///
    /// Returns an error if any line is for a different year; nothing is
    /// applied in that case.
    pub fn record_season_stats(
        &mut self,
        year: u16,
        lines: &[SeasonStatLine],
        awards: &SeasonAwards,
    ) -> Result<IngestReport, HistoryError> {
        Self::check_season(year, lines)?;
        let mut report = IngestReport::default();
        for line in lines {
            if !line.meets_playing_time() {
                report.skipped += 1;
                continue;
            }
            let record = match self.records.entry(line.player_id) {
                std::collections::btree_map::Entry::Occupied(entry) => {
                    report.updated += 1;
                    entry.into_mut()
                }
                std::collections::btree_map::Entry::Vacant(entry) => {
                    report.created += 1;
                    entry.insert(CareerRecord::new(line))
                }
            };
            record.absorb(line);
            let season_awards = awards.labels_for_player(line.player_id);
            record
                .season_log
                .push(SeasonLogEntry::from_line(line, season_awards));
        }
        Ok(report)
    }

    #[must_use]
    pub fn get(&self, player_id: PlayerId) -> Option<&CareerRecord> {
        self.records.get(&player_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CareerRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply committed inductions and return the updated records.
    /// Already-inducted players are left untouched and not returned.
    pub fn commit_inductions(&mut self, inductions: &[HofInduction]) -> Vec<CareerRecord> {
        let mut updated = Vec::new();
        for induction in inductions {
            let Some(record) = self.records.get_mut(&induction.player_id) else {
                continue;
            };
            if record.hof_inducted {
                continue;
            }
            record.hof_eligible = true;
            record.hof_inducted = true;
            record.hof_year = Some(induction.year);
            record.hof_vote_pct = Some(induction.vote_pct);
            log::info!(
                "hall of fame: inducted {} ({}) with {:.1}%",
                record.name,
                induction.year,
                induction.vote_pct
            );
            updated.push(record.clone());
        }
        updated
    }

    /// Flag evaluated players as having appeared on a ballot.
    pub fn mark_eligible(&mut self, player_ids: &[PlayerId]) {
        for id in player_ids {
            if let Some(record) = self.records.get_mut(id) {
                record.hof_eligible = true;
            }
        }
    }

    /// Plain `(id, record)` pairs for persistence.
    #[must_use]
    pub fn entries(&self) -> Vec<(PlayerId, CareerRecord)> {
        self.records
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect()
    }

    /// Replace every record with the supplied pairs.
    pub fn restore(&mut self, entries: Vec<(PlayerId, CareerRecord)>) {
        self.records.clear();
        self.records.extend(entries);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::history::AwardKind;
    use crate::history::tests::winner;

    pub(crate) fn hitter_line(player_id: PlayerId, year: u16, team: &str) -> SeasonStatLine {
        SeasonStatLine {
            player_id,
            year,
            name: format!("Hitter {player_id}"),
            team: team.to_string(),
            position: "SS".to_string(),
            g: 150,
            pa: 640,
            ab: 560,
            h: 168,
            doubles: 30,
            triples: 3,
            hr: 25,
            rbi: 90,
            bb: 60,
            so: 110,
            sb: 12,
            r: 88,
            ..SeasonStatLine::default()
        }
    }

    pub(crate) fn pitcher_line(player_id: PlayerId, year: u16, team: &str) -> SeasonStatLine {
        SeasonStatLine {
            player_id,
            year,
            name: format!("Pitcher {player_id}"),
            team: team.to_string(),
            position: "SP".to_string(),
            is_pitcher: true,
            g: 32,
            gs: 32,
            w: 15,
            l: 8,
            outs: 600,
            h_allowed: 180,
            er: 66,
            bb_allowed: 50,
            k: 210,
            ..SeasonStatLine::default()
        }
    }

    #[test]
    fn minimal_playing_time_skips_both_gates() {
        let mut store = CareerRecordStore::new();
        let cameo = SeasonStatLine {
            player_id: 5,
            year: 2001,
            pa: 9,
            outs: 9,
            ..SeasonStatLine::default()
        };
        let report = store
            .record_season_stats(2001, &[cameo], &SeasonAwards::default())
            .unwrap();
        assert_eq!(report.skipped, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn reliever_with_no_plate_appearances_still_counts() {
        let mut store = CareerRecordStore::new();
        let reliever = SeasonStatLine {
            player_id: 8,
            year: 2001,
            is_pitcher: true,
            outs: 12,
            er: 2,
            sv: 3,
            ..SeasonStatLine::default()
        };
        store
            .record_season_stats(2001, &[reliever], &SeasonAwards::default())
            .unwrap();
        let record = store.get(8).unwrap();
        assert_eq!(record.sv, 3);
        assert!((record.season_log[0].era - 4.5).abs() < 1e-9);
        assert!(record.season_log[0].avg.abs() < f64::EPSILON);
    }

    #[test]
    fn seasons_accumulate_and_log_rates() {
        let mut store = CareerRecordStore::new();
        let mut awards = SeasonAwards::default();
        awards.set(AwardKind::MvpAl, winner(1, "Hitter 1", "BOS"));
        store
            .record_season_stats(2001, &[hitter_line(1, 2001, "BOS")], &awards)
            .unwrap();
        store
            .record_season_stats(
                2002,
                &[hitter_line(1, 2002, "NYY")],
                &SeasonAwards::default(),
            )
            .unwrap();
        let record = store.get(1).unwrap();
        assert_eq!(record.seasons, 2);
        assert_eq!(record.h, 336);
        assert_eq!(record.first_year, 2001);
        assert_eq!(record.last_year, 2002);
        assert_eq!(record.season_log[0].awards, vec!["AL MVP".to_string()]);
        assert!(record.season_log[1].awards.is_empty());
        assert!((record.season_log[0].avg - 0.3).abs() < 1e-9);
        assert_eq!(record.season_log[1].team, "NYY");
    }

    #[test]
    fn mismatched_year_applies_nothing() {
        let mut store = CareerRecordStore::new();
        let err = store
            .record_season_stats(
                2001,
                &[hitter_line(1, 2001, "BOS"), hitter_line(2, 2002, "BOS")],
                &SeasonAwards::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            HistoryError::StatLineYearMismatch { player_id: 2, .. }
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn induction_commit_is_permanent_and_single() {
        let mut store = CareerRecordStore::new();
        store
            .record_season_stats(
                2001,
                &[pitcher_line(3, 2001, "ATL")],
                &SeasonAwards::default(),
            )
            .unwrap();
        let first = store.commit_inductions(&[HofInduction {
            player_id: 3,
            year: 2006,
            vote_pct: 81.2,
        }]);
        assert_eq!(first.len(), 1);
        let second = store.commit_inductions(&[HofInduction {
            player_id: 3,
            year: 2010,
            vote_pct: 99.0,
        }]);
        assert!(second.is_empty());
        let record = store.get(3).unwrap();
        assert_eq!(record.hof_year, Some(2006));
        assert!(record.hof_inducted);
    }

    #[test]
    fn restore_round_trips_entries() {
        let mut store = CareerRecordStore::new();
        store
            .record_season_stats(
                2001,
                &[hitter_line(1, 2001, "BOS"), pitcher_line(2, 2001, "BOS")],
                &SeasonAwards::default(),
            )
            .unwrap();
        let mut restored = CareerRecordStore::new();
        restored
            .record_season_stats(
                2001,
                &[hitter_line(9, 2001, "SEA")],
                &SeasonAwards::default(),
            )
            .unwrap();
        restored.restore(store.entries());
        assert_eq!(restored, store);
        assert!(restored.get(9).is_none());
    }
}
