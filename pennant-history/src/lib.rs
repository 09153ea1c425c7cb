//! Pennant History Engine
//!
//! Turns season-end simulation output (team records, award winners and
//! player stat lines) into rankable history: dominance scores, dynasty
//! profiles, eras, leaderboards, franchise records and the Hall of Fame.
//! This crate performs no I/O beyond JSON (de)serialization.

pub mod career;
pub mod chronicle;
pub mod config;
pub mod constants;
pub mod dominance;
pub mod eras;
pub mod error;
pub mod franchise;
pub mod hall;
pub mod history;
pub mod hof;
pub mod identity;
pub mod leaders;
pub mod longevity;
pub mod milestones;
pub mod numbers;
pub mod peak;
pub mod profile;
pub mod seed;
pub mod transactions;

// Re-export commonly used types
pub use career::{
    CareerRecord, CareerRecordStore, HofInduction, IngestReport, SeasonLogEntry, SeasonStatLine,
    batting_average, earned_run_average,
};
pub use chronicle::{
    BallotResult, Chronicle, ChronicleSave, ChronicleSnapshot, CommitSummary, SeasonRollover,
};
pub use config::{
    AnalyticsConfig, EraConfig, HallConfig, HofConfig, MilestoneConfig, PeakConfig, RecordConfig,
};
pub use dominance::{FranchiseTotals, dominance_score, dynasty_index, season_dominance};
pub use eras::{EraCard, detect_eras};
pub use error::{ConfigError, HistoryError};
pub use franchise::{FranchiseRecord, FranchiseRecordBook, franchise_records};
pub use hall::{HallOfSeasonEntry, TopPlayerBadge, hall_of_seasons};
pub use history::{
    AwardHistoryEntry, AwardKind, AwardWinner, ChampionEntry, PlayerId, SeasonAwards,
    SeasonHistoryEntry, SeasonHistoryStore, SeasonTeamRecord, TeamId,
};
pub use hof::{HofCandidate, HofEvaluator, Retiree, hof_score, inductions, simulate_vote};
pub use identity::{IdentityTag, IdentityTagSet, identity_tags};
pub use leaders::{AllTimeLeader, LeaderStat, UnknownStat, all_time_leaders};
pub use longevity::{LongevityProfile, longevity};
pub use milestones::{MILESTONE_STATS, Milestone, MilestoneLog, MilestoneStat};
pub use peak::{PeakPowerWindow, peak_power};
pub use profile::{DynastyProfile, dynasty_profile, franchise_totals};
pub use seed::ballot_rng;
pub use transactions::{Transaction, TransactionKind, TransactionLog};
