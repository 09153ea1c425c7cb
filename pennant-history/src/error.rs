//! Error types surfaced by season ingestion and save restoration.
use thiserror::Error;

/// Errors raised when a season rollover or a save blob violates the
/// ingestion contract.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("season {year} is not after the last committed season {last}")]
    SeasonOutOfOrder { year: u16, last: u16 },
    #[error("team id {team_id} appears more than once in season {year}")]
    DuplicateTeamId { year: u16, team_id: u32 },
    #[error("team abbreviation {abbr} appears more than once in season {year}")]
    DuplicateAbbreviation { year: u16, abbr: String },
    #[error("champion id {team_id} has no team record in season {year}")]
    UnknownChampion { year: u16, team_id: u32 },
    #[error("season {year} has no team records")]
    EmptySeason { year: u16 },
    #[error("stat line for player {player_id} belongs to {found}, expected {expected}")]
    StatLineYearMismatch {
        player_id: u32,
        expected: u16,
        found: u16,
    },
    #[error("team id {team_id} has no recorded seasons")]
    UnknownTeam { team_id: u32 },
    #[error("save blob JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when analytics configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: u32,
        value: u32,
    },
    #[error("{field} must be between {min:.1} and {max:.1} (got {value:.1})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}
