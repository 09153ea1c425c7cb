//! Sustained-excellence streak detection across the whole league.
//!
//! Each franchise (by abbreviation) carries one open streak. Qualifying
//! seasons extend it; a single down year is tolerated, but reaching the
//! configured run of consecutive down years flushes the streak and starts
//! a new one seeded from the season that ended it.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::EraConfig;
use crate::dominance::dominance_score;
use crate::history::{SeasonHistoryEntry, SeasonTeamRecord};
use crate::numbers::{round_f64_to_u32, usize_to_f64};

/// A detected multi-season run of excellence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraCard {
    pub abbr: String,
    pub team_name: String,
    pub start_year: u16,
    pub end_year: u16,
    pub wins: u32,
    pub losses: u32,
    pub titles: u32,
    /// Qualifying seasons inside the era; always at least two.
    pub seasons: u32,
    pub avg_dominance: u32,
    pub total_dominance: u32,
    pub playoff_wins: u32,
    /// Seasons inside the era with the league's #1 offense.
    pub best_offense: u32,
    pub best_pitching: u32,
}

#[derive(Debug, Clone)]
struct Streak {
    team_name: String,
    start: u16,
    end: u16,
    wins: u32,
    losses: u32,
    titles: u32,
    playoff_wins: u32,
    dom_scores: Vec<u32>,
    down_years: u32,
    best_offense: u32,
    best_pitching: u32,
}

impl Streak {
    fn open(year: u16, record: &SeasonTeamRecord) -> Self {
        Self {
            team_name: record.name.clone(),
            start: year,
            end: year,
            wins: 0,
            losses: 0,
            titles: 0,
            playoff_wins: 0,
            dom_scores: Vec::new(),
            down_years: 0,
            best_offense: 0,
            best_pitching: 0,
        }
    }

    /// A fresh streak carrying the triggering season's line but no
    /// qualifying score.
    fn seeded(season: &SeasonHistoryEntry, record: &SeasonTeamRecord) -> Self {
        let mut streak = Self::open(season.year, record);
        streak.accumulate(season, record);
        streak
    }

    fn accumulate(&mut self, season: &SeasonHistoryEntry, record: &SeasonTeamRecord) {
        self.end = season.year;
        self.team_name.clone_from(&record.name);
        self.wins += record.wins;
        self.losses += record.losses;
        self.playoff_wins += record.playoff_wins;
        if season.is_champion(record.team_id) {
            self.titles += 1;
        }
        if record.offense_rank == 1 {
            self.best_offense += 1;
        }
        if record.pitching_rank == 1 {
            self.best_pitching += 1;
        }
    }

    fn extend(&mut self, season: &SeasonHistoryEntry, record: &SeasonTeamRecord, dominance: u32) {
        self.accumulate(season, record);
        self.dom_scores.push(dominance);
        self.down_years = 0;
    }

    fn into_card(self, abbr: &str, min_seasons: u32) -> Option<EraCard> {
        let seasons = u32::try_from(self.dom_scores.len()).unwrap_or(u32::MAX);
        if seasons < min_seasons.max(2) {
            return None;
        }
        let total: u32 = self.dom_scores.iter().sum();
        let avg = round_f64_to_u32(f64::from(total) / usize_to_f64(self.dom_scores.len()));
        Some(EraCard {
            abbr: abbr.to_string(),
            team_name: self.team_name,
            start_year: self.start,
            end_year: self.end,
            wins: self.wins,
            losses: self.losses,
            titles: self.titles,
            seasons,
            avg_dominance: avg,
            total_dominance: total,
            playoff_wins: self.playoff_wins,
            best_offense: self.best_offense,
            best_pitching: self.best_pitching,
        })
    }
}

/// Scan chronological `history` and return the strongest eras, sorted by
/// total dominance (descending) and capped by `cfg.cap`.
#[must_use]
pub fn detect_eras(history: &[SeasonHistoryEntry], cfg: &EraConfig) -> Vec<EraCard> {
    let mut streaks: BTreeMap<String, Streak> = BTreeMap::new();
    let mut cards = Vec::new();

    for season in history {
        for record in &season.team_records {
            let dominance = dominance_score(record, season);
            if dominance >= cfg.threshold {
                streaks
                    .entry(record.abbr.clone())
                    .or_insert_with(|| Streak::open(season.year, record))
                    .extend(season, record, dominance);
                continue;
            }

            let Some(streak) = streaks.get_mut(&record.abbr) else {
                continue;
            };
            streak.down_years += 1;
            if streak.down_years >= cfg.down_year_limit {
                let finished = std::mem::replace(streak, Streak::seeded(season, record));
                if let Some(card) = finished.into_card(&record.abbr, cfg.min_seasons) {
                    log::debug!(
                        "era closed: {} {}-{} ({} seasons)",
                        card.abbr,
                        card.start_year,
                        card.end_year,
                        card.seasons
                    );
                    cards.push(card);
                }
            }
        }
    }

    for (abbr, streak) in streaks {
        if let Some(card) = streak.into_card(&abbr, cfg.min_seasons) {
            cards.push(card);
        }
    }

    cards.sort_by(|a, b| b.total_dominance.cmp(&a.total_dominance));
    cards.truncate(cfg.cap);
    cards
}
