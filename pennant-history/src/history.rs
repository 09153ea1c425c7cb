//! Season-by-season league history: team records, champions and awards.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::HistoryError;

pub type TeamId = u32;
pub type PlayerId = u32;

/// Final line for one team in one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonTeamRecord {
    pub team_id: TeamId,
    pub abbr: String,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
    #[serde(default)]
    pub playoff_wins: u32,
    /// League rank of the offense, 1 being best.
    pub offense_rank: u8,
    pub pitching_rank: u8,
    pub farm_rank: u8,
}

impl SeasonTeamRecord {
    #[must_use]
    pub fn run_differential(&self) -> i64 {
        i64::from(self.runs_scored) - i64::from(self.runs_allowed)
    }

    #[must_use]
    pub const fn is_winning(&self) -> bool {
        self.wins > self.losses
    }

    #[must_use]
    pub const fn made_playoffs(&self) -> bool {
        self.playoff_wins > 0
    }

    /// Winning percentage with an empty record treated as zero.
    #[must_use]
    pub fn win_pct(&self) -> f64 {
        crate::numbers::guarded_ratio(self.wins, self.wins + self.losses)
    }
}

/// A single award winner; the team is referenced by abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardWinner {
    pub player_id: PlayerId,
    pub name: String,
    pub team: String,
    pub position: String,
}

/// The individual awards handed out each season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardKind {
    MvpAl,
    MvpNl,
    CyYoungAl,
    CyYoungNl,
    RookieAl,
    RookieNl,
}

impl AwardKind {
    pub const ALL: [Self; 6] = [
        Self::MvpAl,
        Self::MvpNl,
        Self::CyYoungAl,
        Self::CyYoungNl,
        Self::RookieAl,
        Self::RookieNl,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MvpAl => "AL MVP",
            Self::MvpNl => "NL MVP",
            Self::CyYoungAl => "AL Cy Young",
            Self::CyYoungNl => "NL Cy Young",
            Self::RookieAl => "AL Rookie of the Year",
            Self::RookieNl => "NL Rookie of the Year",
        }
    }

    #[must_use]
    pub const fn is_mvp(self) -> bool {
        matches!(self, Self::MvpAl | Self::MvpNl)
    }

    #[must_use]
    pub const fn is_cy_young(self) -> bool {
        matches!(self, Self::CyYoungAl | Self::CyYoungNl)
    }
}

impl std::fmt::Display for AwardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeasonAwards {
    #[serde(default)]
    pub mvp_al: Option<AwardWinner>,
    #[serde(default)]
    pub mvp_nl: Option<AwardWinner>,
    #[serde(default)]
    pub cy_al: Option<AwardWinner>,
    #[serde(default)]
    pub cy_nl: Option<AwardWinner>,
    #[serde(default)]
    pub roy_al: Option<AwardWinner>,
    #[serde(default)]
    pub roy_nl: Option<AwardWinner>,
}

impl SeasonAwards {
    #[must_use]
    pub const fn get(&self, kind: AwardKind) -> Option<&AwardWinner> {
        match kind {
            AwardKind::MvpAl => self.mvp_al.as_ref(),
            AwardKind::MvpNl => self.mvp_nl.as_ref(),
            AwardKind::CyYoungAl => self.cy_al.as_ref(),
            AwardKind::CyYoungNl => self.cy_nl.as_ref(),
            AwardKind::RookieAl => self.roy_al.as_ref(),
            AwardKind::RookieNl => self.roy_nl.as_ref(),
        }
    }

    pub fn set(&mut self, kind: AwardKind, winner: AwardWinner) {
        let slot = match kind {
            AwardKind::MvpAl => &mut self.mvp_al,
            AwardKind::MvpNl => &mut self.mvp_nl,
            AwardKind::CyYoungAl => &mut self.cy_al,
            AwardKind::CyYoungNl => &mut self.cy_nl,
            AwardKind::RookieAl => &mut self.roy_al,
            AwardKind::RookieNl => &mut self.roy_nl,
        };
        *slot = Some(winner);
    }

    /// Every awarded slot, in `AwardKind::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (AwardKind, &AwardWinner)> {
        AwardKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|winner| (kind, winner)))
    }

    /// Awards won by a player, as display labels.
    #[must_use]
    pub fn labels_for_player(&self, player_id: PlayerId) -> Vec<String> {
        self.iter()
            .filter(|(_, winner)| winner.player_id == player_id)
            .map(|(kind, _)| kind.label().to_string())
            .collect()
    }

    /// Whether either MVP this season played for `abbr`.
    #[must_use]
    pub fn team_has_mvp(&self, abbr: &str) -> bool {
        self.iter()
            .any(|(kind, winner)| kind.is_mvp() && winner.team == abbr)
    }
}

/// One season's league state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonHistoryEntry {
    pub year: u16,
    #[serde(default)]
    pub champion_id: Option<TeamId>,
    #[serde(default)]
    pub awards: SeasonAwards,
    pub team_records: Vec<SeasonTeamRecord>,
}

impl SeasonHistoryEntry {
    #[must_use]
    pub fn record_for(&self, team_id: TeamId) -> Option<&SeasonTeamRecord> {
        self.team_records.iter().find(|rec| rec.team_id == team_id)
    }

    #[must_use]
    pub fn is_champion(&self, team_id: TeamId) -> bool {
        self.champion_id == Some(team_id)
    }

    #[must_use]
    pub fn champion(&self) -> Option<&SeasonTeamRecord> {
        self.champion_id.and_then(|id| self.record_for(id))
    }

    /// Check the per-season uniqueness and reference invariants.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids or abbreviations, an empty season,
    /// or a champion without a team record.
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.team_records.is_empty() {
            return Err(HistoryError::EmptySeason { year: self.year });
        }
        let mut ids = BTreeSet::new();
        let mut abbrs = BTreeSet::new();
        for rec in &self.team_records {
            if !ids.insert(rec.team_id) {
                return Err(HistoryError::DuplicateTeamId {
                    year: self.year,
                    team_id: rec.team_id,
                });
            }
            if !abbrs.insert(rec.abbr.as_str()) {
                return Err(HistoryError::DuplicateAbbreviation {
                    year: self.year,
                    abbr: rec.abbr.clone(),
                });
            }
        }
        if let Some(team_id) = self.champion_id
            && !ids.contains(&team_id)
        {
            return Err(HistoryError::UnknownChampion {
                year: self.year,
                team_id,
            });
        }
        Ok(())
    }
}

/// Awards for one season, as exposed to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardHistoryEntry {
    pub year: u16,
    pub awards: SeasonAwards,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionEntry {
    pub year: u16,
    pub team_id: TeamId,
    pub abbr: String,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
}

/// Append-only, chronologically ordered season history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonHistoryStore {
    seasons: Vec<SeasonHistoryEntry>,
}

impl SeasonHistoryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seasons: Vec::new(),
        }
    }

    /// Build a store from already-ordered seasons, validating each.
    ///
    /// # Errors
    ///
    /// Returns the first ordering or per-season violation.
    pub fn from_seasons(seasons: Vec<SeasonHistoryEntry>) -> Result<Self, HistoryError> {
        let mut store = Self::new();
        for season in seasons {
            store.append(season)?;
        }
        Ok(store)
    }

    /// Validate the season against the store, without appending it.
    ///
    /// # Errors
    ///
    /// Returns an error if the season is invalid or not strictly after the
    /// last recorded season.
    pub fn check(&self, entry: &SeasonHistoryEntry) -> Result<(), HistoryError> {
        if let Some(last) = self.last_year()
            && entry.year <= last
        {
            return Err(HistoryError::SeasonOutOfOrder {
                year: entry.year,
                last,
            });
        }
        entry.validate()
    }

    /// Append a completed season.
    ///
    /// # Errors
    ///
    /// See [`Self::check`].
    pub fn append(&mut self, entry: SeasonHistoryEntry) -> Result<(), HistoryError> {
        self.check(&entry)?;
        self.seasons.push(entry);
        Ok(())
    }

    #[must_use]
    pub fn seasons(&self) -> &[SeasonHistoryEntry] {
        &self.seasons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    #[must_use]
    pub fn last_year(&self) -> Option<u16> {
        self.seasons.last().map(|season| season.year)
    }

    #[must_use]
    pub fn season(&self, year: u16) -> Option<&SeasonHistoryEntry> {
        self.seasons.iter().find(|season| season.year == year)
    }

    /// Every team id that has at least one recorded season.
    #[must_use]
    pub fn team_ids(&self) -> BTreeSet<TeamId> {
        self.seasons
            .iter()
            .flat_map(|season| season.team_records.iter().map(|rec| rec.team_id))
            .collect()
    }

    /// Awards per season, most recent first.
    #[must_use]
    pub fn award_history(&self) -> Vec<AwardHistoryEntry> {
        self.seasons
            .iter()
            .rev()
            .map(|season| AwardHistoryEntry {
                year: season.year,
                awards: season.awards.clone(),
            })
            .collect()
    }

    /// Champions, most recent first. Seasons without a champion are skipped.
    #[must_use]
    pub fn champion_history(&self) -> Vec<ChampionEntry> {
        self.seasons
            .iter()
            .rev()
            .filter_map(|season| {
                season.champion().map(|rec| ChampionEntry {
                    year: season.year,
                    team_id: rec.team_id,
                    abbr: rec.abbr.clone(),
                    name: rec.name.clone(),
                    wins: rec.wins,
                    losses: rec.losses,
                })
            })
            .collect()
    }
}
