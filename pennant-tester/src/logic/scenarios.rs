use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::hash::Hasher;
use twox_hash::XxHash64;

use pennant_history::{
    AnalyticsConfig, CareerRecordStore, Chronicle, FranchiseTotals, LeaderStat, PlayerId,
    dynasty_index, peak_power,
};

use super::league::{LeaguePlan, LeagueRun, synthesize};

/// Named checks the tester can run against a synthesized league.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Determinism,
    Invariants,
    SaveRoundtrip,
    HallOfFame,
}

impl Scenario {
    pub const ALL: [Self; 4] = [
        Self::Determinism,
        Self::Invariants,
        Self::SaveRoundtrip,
        Self::HallOfFame,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Determinism => "determinism",
            Self::Invariants => "invariants",
            Self::SaveRoundtrip => "save-roundtrip",
            Self::HallOfFame => "hall-of-fame",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Determinism => "Two runs of the same seed produce identical analytics digests",
            Self::Invariants => "Era, peak, leaderboard and Hall of Seasons invariants hold",
            Self::SaveRoundtrip => "JSON save and restore reproduce the session exactly",
            Self::HallOfFame => "Ballots never induct short careers, repeat, or drift on replay",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Run the scenario against `run`; every returned string is a failure.
    ///
    /// # Errors
    ///
    /// Returns an error when the scenario cannot be carried out at all,
    /// for example when a comparison league fails to synthesize.
    pub fn check(self, run: &LeagueRun, config: &AnalyticsConfig) -> Result<Vec<String>> {
        match self {
            Self::Determinism => check_determinism(run, config),
            Self::Invariants => Ok(check_invariants(run)),
            Self::SaveRoundtrip => check_save_roundtrip(run),
            Self::HallOfFame => Ok(check_hall_of_fame(run)),
        }
    }
}

/// XxHash64 of the canonical JSON of every derived view of `chronicle`.
///
/// # Errors
///
/// Returns an error if a view fails to serialize.
pub fn analytics_digest(chronicle: &Chronicle) -> Result<u64> {
    let snapshot = chronicle.snapshot();
    let mut hasher = XxHash64::with_seed(0);
    for team_id in snapshot.history.team_ids() {
        let profile = chronicle
            .dynasty_profile(team_id)
            .with_context(|| format!("profile for team {team_id}"))?;
        hasher.write(&serde_json::to_vec(&profile)?);
    }
    hasher.write(&serde_json::to_vec(&chronicle.eras())?);
    hasher.write(&serde_json::to_vec(&chronicle.hall_of_seasons())?);
    for stat in LeaderStat::ALL {
        hasher.write(&serde_json::to_vec(&chronicle.all_time_leaders(stat, 25))?);
    }
    hasher.write(&serde_json::to_vec(&chronicle.milestones())?);
    Ok(hasher.finish())
}

fn check_determinism(run: &LeagueRun, config: &AnalyticsConfig) -> Result<Vec<String>> {
    let replay = synthesize(run.plan, run.seed, config, false)?;
    let expected = analytics_digest(&run.chronicle)?;
    let actual = analytics_digest(&replay.chronicle)?;
    let mut failures = Vec::new();
    if expected != actual {
        failures.push(format!(
            "digest mismatch for seed {}: {expected:016x} vs {actual:016x}",
            run.seed
        ));
    }
    if replay.ballots != run.ballots {
        failures.push(format!("ballot outcomes differ for seed {}", run.seed));
    }
    Ok(failures)
}

fn check_invariants(run: &LeagueRun) -> Vec<String> {
    let chronicle = &run.chronicle;
    let config = chronicle.config();
    let snapshot = chronicle.snapshot();
    let history = snapshot.history.seasons();
    let mut failures = Vec::new();

    for era in chronicle.eras() {
        if era.seasons < 2 || era.start_year > era.end_year {
            failures.push(format!(
                "era {} {}-{} has {} qualifying seasons",
                era.abbr, era.start_year, era.end_year, era.seasons
            ));
        }
    }

    let window = u16::try_from(config.peak.window).unwrap_or(u16::MAX);
    for team_id in snapshot.history.team_ids() {
        let peak = peak_power(history, team_id, &config.peak);
        let well_formed = if history.len() < config.peak.window {
            peak.is_empty()
        } else {
            peak.end_year - peak.start_year + 1 == window
        };
        if !well_formed {
            failures.push(format!(
                "team {team_id} peak window {}-{} is malformed",
                peak.start_year, peak.end_year
            ));
        }
    }

    let unplayed = FranchiseTotals {
        titles: 3,
        mvps: 2,
        ..FranchiseTotals::default()
    };
    if dynasty_index(&unplayed) != 0 {
        failures.push("dynasty index of an unplayed franchise is not zero".to_string());
    }

    for leader in chronicle.all_time_leaders(LeaderStat::Average, usize::MAX) {
        let qualified = chronicle
            .career(leader.player_id)
            .is_some_and(|career| career.ab > config.records.leader_min_ab);
        if !qualified {
            failures.push(format!(
                "player {} leads avg without enough at-bats",
                leader.player_id
            ));
        }
    }
    for stat in LeaderStat::ALL {
        let leaders = chronicle.all_time_leaders(stat, 10);
        let ranked = leaders
            .iter()
            .zip(1..)
            .all(|(leader, rank)| leader.rank == rank);
        if !ranked {
            failures.push(format!("{stat} leaderboard ranks are not 1..n"));
        }
    }

    let hall = chronicle.hall_of_seasons();
    if hall.len() > config.hall.size {
        failures.push(format!("hall of seasons holds {} entries", hall.len()));
    }
    if hall.windows(2).any(|pair| pair[0].dominance < pair[1].dominance) {
        failures.push("hall of seasons is not ordered by dominance".to_string());
    }
    failures
}

fn check_save_roundtrip(run: &LeagueRun) -> Result<Vec<String>> {
    let original = &run.chronicle;
    let json = original.to_json()?;
    let mut restored = Chronicle::new(original.config().clone(), 0);
    restored
        .restore_json(&json)
        .context("restoring the save blob")?;

    let mut failures = Vec::new();
    if *restored.snapshot() != *original.snapshot() {
        failures.push("restored snapshot differs from the original".to_string());
    }
    if restored.session_seed() != original.session_seed() {
        failures.push("session seed was not persisted".to_string());
    }
    if analytics_digest(&restored)? != analytics_digest(original)? {
        failures.push("restored analytics digest differs".to_string());
    }

    let snapshot = original.snapshot();
    let careers = &snapshot.careers;
    let mut copy = CareerRecordStore::new();
    copy.restore(careers.entries());
    if &copy != careers {
        failures.push("career entries do not round-trip".to_string());
    }
    Ok(failures)
}

fn check_hall_of_fame(run: &LeagueRun) -> Vec<String> {
    let hof = &run.chronicle.config().hof;
    let snapshot = run.chronicle.snapshot();
    let mut failures = Vec::new();

    let mut inducted: BTreeSet<PlayerId> = BTreeSet::new();
    for ballot in &run.ballots {
        for record in &ballot.inducted {
            if record.seasons < hof.min_seasons {
                failures.push(format!(
                    "player {} inducted after {} seasons",
                    record.player_id, record.seasons
                ));
            }
            if record.hof_vote_pct.is_none_or(|pct| pct < hof.induction_vote) {
                failures.push(format!(
                    "player {} inducted without {}% of the vote",
                    record.player_id, hof.induction_vote
                ));
            }
            if !inducted.insert(record.player_id) {
                failures.push(format!("player {} inducted twice", record.player_id));
            }
        }
    }
    let committed = snapshot
        .careers
        .iter()
        .filter(|career| career.hof_inducted)
        .count();
    if committed != inducted.len() {
        failures.push(format!(
            "{committed} careers flagged inducted, ballots inducted {}",
            inducted.len()
        ));
    }

    // A second ballot over every retiree, on the live session and on a
    // restored copy, must agree and may only add new names.
    let year = run.plan.last_year().saturating_add(1);
    let mut live = run.chronicle.clone();
    let mut replay = Chronicle::new(live.config().clone(), 0);
    if let Err(err) = replay.restore(live.save()) {
        failures.push(format!("could not restore session for replay: {err}"));
        return failures;
    }
    let first = live.run_hof_ballot(year, &run.retirees);
    let second = replay.run_hof_ballot(year, &run.retirees);
    if first != second {
        failures.push(format!("ballot {year} differs after restore"));
    }
    for candidate in &first.candidates {
        if inducted.contains(&candidate.player_id) {
            failures.push(format!(
                "inducted player {} was evaluated again",
                candidate.player_id
            ));
        }
    }
    failures
}

/// Build and commit the league for `seed`.
///
/// # Errors
///
/// Returns an error if the league cannot be synthesized.
pub fn prepare(
    plan: LeaguePlan,
    seed: u64,
    config: &AnalyticsConfig,
    verbose: bool,
) -> Result<LeagueRun> {
    synthesize(plan, seed, config, verbose)
        .with_context(|| format!("synthesizing league for seed {seed}"))
}
