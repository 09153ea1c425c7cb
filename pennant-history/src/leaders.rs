//! All-time leaderboards over career records.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::career::{CareerRecord, CareerRecordStore};
use crate::config::RecordConfig;
use crate::history::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaderStat {
    Hits,
    HomeRuns,
    Rbi,
    Steals,
    Runs,
    Average,
    Wins,
    Strikeouts,
    Saves,
    Era,
}

impl LeaderStat {
    pub const ALL: [Self; 10] = [
        Self::Hits,
        Self::HomeRuns,
        Self::Rbi,
        Self::Steals,
        Self::Runs,
        Self::Average,
        Self::Wins,
        Self::Strikeouts,
        Self::Saves,
        Self::Era,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hits => "hits",
            Self::HomeRuns => "hr",
            Self::Rbi => "rbi",
            Self::Steals => "sb",
            Self::Runs => "runs",
            Self::Average => "avg",
            Self::Wins => "wins",
            Self::Strikeouts => "k",
            Self::Saves => "saves",
            Self::Era => "era",
        }
    }

    #[must_use]
    pub const fn is_rate(self) -> bool {
        matches!(self, Self::Average | Self::Era)
    }

    /// Sort value with "higher is better" for every stat, or `None` when
    /// the career lacks the sample a rate stat needs.
    fn sort_value(self, record: &CareerRecord, cfg: &RecordConfig) -> Option<f64> {
        let value = match self {
            Self::Hits => f64::from(record.h),
            Self::HomeRuns => f64::from(record.hr),
            Self::Rbi => f64::from(record.rbi),
            Self::Steals => f64::from(record.sb),
            Self::Runs => f64::from(record.r),
            Self::Wins => f64::from(record.w),
            Self::Strikeouts => f64::from(record.k),
            Self::Saves => f64::from(record.sv),
            Self::Average => {
                if record.ab <= cfg.leader_min_ab {
                    return None;
                }
                record.avg()
            }
            Self::Era => {
                if record.outs <= cfg.leader_min_outs {
                    return None;
                }
                -record.era()
            }
        };
        Some(value)
    }

    fn display_value(self, sort_value: f64) -> f64 {
        match self {
            Self::Era => -sort_value,
            _ => sort_value,
        }
    }
}

impl fmt::Display for LeaderStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown leaderboard stat `{0}`")]
pub struct UnknownStat(pub String);

impl FromStr for LeaderStat {
    type Err = UnknownStat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStat(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllTimeLeader {
    /// 1-based.
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub value: f64,
    pub seasons: u32,
    pub hof_inducted: bool,
}

/// Top `limit` careers for `stat`. Rate stats skip careers below the
/// qualifying sample instead of ranking them at zero.
#[must_use]
pub fn all_time_leaders(
    careers: &CareerRecordStore,
    stat: LeaderStat,
    limit: usize,
    cfg: &RecordConfig,
) -> Vec<AllTimeLeader> {
    let mut scored: Vec<(f64, &CareerRecord)> = careers
        .iter()
        .filter_map(|record| stat.sort_value(record, cfg).map(|value| (value, record)))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .zip(1_usize..)
        .map(|((value, record), rank)| AllTimeLeader {
            rank,
            player_id: record.player_id,
            name: record.name.clone(),
            value: stat.display_value(value),
            seasons: record.seasons,
            hof_inducted: record.hof_inducted,
        })
        .collect()
}
