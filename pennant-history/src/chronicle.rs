//! The per-session store binding season history, careers and logs.
//!
//! Readers receive [`ChronicleSnapshot`]s behind an `Arc`. Writes go
//! through [`Arc::make_mut`], so a snapshot already handed out never
//! changes underneath its holder.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::career::{CareerRecord, CareerRecordStore, IngestReport, SeasonStatLine};
use crate::config::AnalyticsConfig;
use crate::eras::{EraCard, detect_eras};
use crate::error::HistoryError;
use crate::franchise::{FranchiseRecordBook, franchise_records};
use crate::hall::{HallOfSeasonEntry, hall_of_seasons};
use crate::history::{
    AwardHistoryEntry, ChampionEntry, PlayerId, SeasonAwards, SeasonHistoryEntry,
    SeasonHistoryStore, SeasonTeamRecord, TeamId,
};
use crate::hof::{HofCandidate, HofEvaluator, Retiree, inductions};
use crate::leaders::{AllTimeLeader, LeaderStat, all_time_leaders};
use crate::milestones::{Milestone, MilestoneLog};
use crate::profile::{DynastyProfile, dynasty_profile};
use crate::seed::ballot_rng;
use crate::transactions::{Transaction, TransactionKind, TransactionLog};

/// Immutable view of everything committed so far.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChronicleSnapshot {
    pub history: SeasonHistoryStore,
    pub careers: CareerRecordStore,
    pub transactions: TransactionLog,
    pub milestones: MilestoneLog,
}

/// One season's upstream output, staged until [`Chronicle::commit`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRollover {
    year: u16,
    team_records: Vec<SeasonTeamRecord>,
    awards: SeasonAwards,
    champion_id: Option<TeamId>,
    stat_lines: Vec<SeasonStatLine>,
}

impl SeasonRollover {
    #[must_use]
    pub fn new(year: u16) -> Self {
        Self {
            year,
            team_records: Vec::new(),
            awards: SeasonAwards::default(),
            champion_id: None,
            stat_lines: Vec::new(),
        }
    }

    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    pub fn record_team_record(&mut self, record: SeasonTeamRecord) -> &mut Self {
        self.team_records.push(record);
        self
    }

    pub fn record_season_awards(&mut self, awards: SeasonAwards) -> &mut Self {
        self.awards = awards;
        self
    }

    pub fn record_champion(&mut self, team_id: TeamId) -> &mut Self {
        self.champion_id = Some(team_id);
        self
    }

    pub fn record_season_stats(
        &mut self,
        lines: impl IntoIterator<Item = SeasonStatLine>,
    ) -> &mut Self {
        self.stat_lines.extend(lines);
        self
    }

    fn split(self) -> (SeasonHistoryEntry, Vec<SeasonStatLine>) {
        let entry = SeasonHistoryEntry {
            year: self.year,
            champion_id: self.champion_id,
            awards: self.awards,
            team_records: self.team_records,
        };
        (entry, self.stat_lines)
    }
}

/// What a successful commit changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub year: u16,
    pub teams: usize,
    pub ingest: IngestReport,
    pub milestones: Vec<Milestone>,
}

/// Result of running one year's Hall of Fame ballot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallotResult {
    pub year: u16,
    pub candidates: Vec<HofCandidate>,
    pub inducted: Vec<CareerRecord>,
}

/// Plain-data save blob. Restoring one replaces the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChronicleSave {
    pub session_seed: u64,
    pub seasons: Vec<SeasonHistoryEntry>,
    pub careers: Vec<(PlayerId, CareerRecord)>,
    pub transactions: TransactionLog,
    pub milestones: MilestoneLog,
}

impl ChronicleSave {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns an error if the blob is not a valid save.
    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One game session's historical record.
#[derive(Debug, Clone)]
pub struct Chronicle {
    config: AnalyticsConfig,
    session_seed: u64,
    snapshot: Arc<ChronicleSnapshot>,
}

impl Chronicle {
    #[must_use]
    pub fn new(config: AnalyticsConfig, session_seed: u64) -> Self {
        Self {
            config,
            session_seed,
            snapshot: Arc::new(ChronicleSnapshot::default()),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    #[must_use]
    pub const fn session_seed(&self) -> u64 {
        self.session_seed
    }

    /// Cheap handle on the committed state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ChronicleSnapshot> {
        Arc::clone(&self.snapshot)
    }

    fn seasons(&self) -> &[SeasonHistoryEntry] {
        self.snapshot.history.seasons()
    }

    /// Start staging `year`'s season output.
    #[must_use]
    pub fn begin_season(&self, year: u16) -> SeasonRollover {
        SeasonRollover::new(year)
    }

    /// Validate and apply a staged season in one step: team history,
    /// career ingestion and milestone detection. Nothing is applied if
    /// any part is rejected.
    ///
    /// # Errors
    ///
    /// Returns the first ordering, uniqueness, reference or stat-line
    /// violation found.
    pub fn commit(&mut self, rollover: SeasonRollover) -> Result<CommitSummary, HistoryError> {
        let (entry, lines) = rollover.split();
        let year = entry.year;
        let checked = self
            .snapshot
            .history
            .check(&entry)
            .and_then(|()| CareerRecordStore::check_season(year, &lines));
        if let Err(err) = checked {
            log::warn!("rejected season {year}: {err}");
            return Err(err);
        }

        let teams = entry.team_records.len();
        let limit = self.config.milestones.log_limit;
        let next = Arc::make_mut(&mut self.snapshot);
        let ingest = next.careers.record_season_stats(year, &lines, &entry.awards)?;
        next.history.append(entry)?;
        let milestones = next.milestones.check(&next.careers, year, limit);
        log::debug!(
            "committed season {year}: {teams} teams, {} careers created, {} updated, {} skipped",
            ingest.created,
            ingest.updated,
            ingest.skipped
        );
        Ok(CommitSummary {
            year,
            teams,
            ingest,
            milestones,
        })
    }

    pub fn record_transaction(
        &mut self,
        year: u16,
        kind: TransactionKind,
        team: &str,
        player_id: Option<PlayerId>,
        description: &str,
    ) -> Transaction {
        Arc::make_mut(&mut self.snapshot)
            .transactions
            .record(year, kind, team, player_id, description)
    }

    /// Scan careers for thresholds crossed in `year`. Safe to repeat.
    pub fn check_milestones(&mut self, year: u16) -> Vec<Milestone> {
        let limit = self.config.milestones.log_limit;
        let next = Arc::make_mut(&mut self.snapshot);
        next.milestones.check(&next.careers, year, limit)
    }

    #[must_use]
    pub fn award_history(&self) -> Vec<AwardHistoryEntry> {
        self.snapshot.history.award_history()
    }

    #[must_use]
    pub fn champion_history(&self) -> Vec<ChampionEntry> {
        self.snapshot.history.champion_history()
    }

    #[must_use]
    pub fn transactions(&self, team: Option<&str>, limit: usize) -> Vec<Transaction> {
        self.snapshot.transactions.query(team, limit)
    }

    #[must_use]
    pub fn milestones(&self) -> Vec<Milestone> {
        self.snapshot.milestones.recent()
    }

    #[must_use]
    pub fn career(&self, player_id: PlayerId) -> Option<&CareerRecord> {
        self.snapshot.careers.get(player_id)
    }

    #[must_use]
    pub fn all_time_leaders(&self, stat: LeaderStat, limit: usize) -> Vec<AllTimeLeader> {
        all_time_leaders(&self.snapshot.careers, stat, limit, &self.config.records)
    }

    #[must_use]
    pub fn franchise_records(&self, abbr: &str) -> FranchiseRecordBook {
        franchise_records(&self.snapshot.careers, abbr, &self.config.records)
    }

    #[must_use]
    pub fn eras(&self) -> Vec<EraCard> {
        detect_eras(self.seasons(), &self.config.eras)
    }

    #[must_use]
    pub fn hall_of_seasons(&self) -> Vec<HallOfSeasonEntry> {
        hall_of_seasons(self.seasons(), &self.config.hall)
    }

    /// # Errors
    ///
    /// Returns [`HistoryError::UnknownTeam`] if the team never played.
    pub fn dynasty_profile(&self, team_id: TeamId) -> Result<DynastyProfile, HistoryError> {
        dynasty_profile(self.seasons(), team_id, &self.config)
    }

    /// Evaluate retirees without changing any career.
    pub fn hof_candidates<R: Rng + ?Sized>(
        &self,
        retirees: &[Retiree],
        rng: &mut R,
    ) -> Vec<HofCandidate> {
        HofEvaluator::new(&self.config.hof).evaluate(&self.snapshot.careers, retirees, rng)
    }

    /// Evaluate retirees with `year`'s ballot stream and commit the
    /// resulting inductions. Every retiree long enough to be considered
    /// is marked eligible.
    pub fn run_hof_ballot(&mut self, year: u16, retirees: &[Retiree]) -> BallotResult {
        let mut rng = ballot_rng(self.session_seed, year);
        let evaluator = HofEvaluator::new(&self.config.hof);
        let candidates = evaluator.evaluate(&self.snapshot.careers, retirees, &mut rng);
        let considered: Vec<PlayerId> = retirees
            .iter()
            .filter(|retiree| {
                self.snapshot
                    .careers
                    .get(retiree.player_id)
                    .is_some_and(|record| evaluator.is_eligible(record))
            })
            .map(|retiree| retiree.player_id)
            .collect();

        let next = Arc::make_mut(&mut self.snapshot);
        next.careers.mark_eligible(&considered);
        let inducted = next.careers.commit_inductions(&inductions(&candidates));
        BallotResult {
            year,
            candidates,
            inducted,
        }
    }

    #[must_use]
    pub fn save(&self) -> ChronicleSave {
        ChronicleSave {
            session_seed: self.session_seed,
            seasons: self.seasons().to_vec(),
            careers: self.snapshot.careers.entries(),
            transactions: self.snapshot.transactions.clone(),
            milestones: self.snapshot.milestones.clone(),
        }
    }

    /// Replace the entire session with `save`. The current state is kept
    /// if the saved history does not validate.
    ///
    /// # Errors
    ///
    /// Returns the first season that violates the history invariants.
    pub fn restore(&mut self, save: ChronicleSave) -> Result<(), HistoryError> {
        let history = SeasonHistoryStore::from_seasons(save.seasons)?;
        let mut careers = CareerRecordStore::new();
        careers.restore(save.careers);
        self.session_seed = save.session_seed;
        self.snapshot = Arc::new(ChronicleSnapshot {
            history,
            careers,
            transactions: save.transactions,
            milestones: save.milestones,
        });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, HistoryError> {
        self.save().to_json()
    }

    /// Parse and restore a JSON save blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob fails to parse or its history does
    /// not validate; the current state is kept in either case.
    pub fn restore_json(&mut self, json: &str) -> Result<(), HistoryError> {
        let save = ChronicleSave::from_json(json)?;
        self.restore(save)
    }
}
