//! Thematic labels describing a team-season's statistical character.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    IDENTITY_DOMINANT_RUN_DIFF, IDENTITY_FORTRESS_RATIO, IDENTITY_JUGGERNAUT_MAX_LOSSES,
    IDENTITY_JUGGERNAUT_WINS, IDENTITY_MAX_TAGS, IDENTITY_POWERHOUSE_WINS, IDENTITY_TOP_UNIT_RANK,
};
use crate::history::{SeasonHistoryEntry, SeasonTeamRecord};

/// Tags kept inline; a season never carries more than three.
pub type IdentityTagSet = SmallVec<[IdentityTag; 3]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityTag {
    PitchingFactory,
    OffensiveJuggernaut,
    Dominant,
    Fortress,
    Juggernaut,
    Powerhouse,
    MvpFactory,
    Champion,
    ProspectPipeline,
}

impl IdentityTag {
    /// Evaluation order. The first three matches win.
    pub const PRIORITY: [Self; 9] = [
        Self::PitchingFactory,
        Self::OffensiveJuggernaut,
        Self::Dominant,
        Self::Fortress,
        Self::Juggernaut,
        Self::Powerhouse,
        Self::MvpFactory,
        Self::Champion,
        Self::ProspectPipeline,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PitchingFactory => "Pitching Factory",
            Self::OffensiveJuggernaut => "Offensive Juggernaut",
            Self::Dominant => "Dominant",
            Self::Fortress => "Fortress",
            Self::Juggernaut => "Juggernaut",
            Self::Powerhouse => "Powerhouse",
            Self::MvpFactory => "MVP Factory",
            Self::Champion => "Champion",
            Self::ProspectPipeline => "Prospect Pipeline",
        }
    }

    fn applies(self, record: &SeasonTeamRecord, season: &SeasonHistoryEntry) -> bool {
        match self {
            Self::PitchingFactory => is_top_unit(record.pitching_rank),
            Self::OffensiveJuggernaut => is_top_unit(record.offense_rank),
            Self::Dominant => record.run_differential() >= IDENTITY_DOMINANT_RUN_DIFF,
            Self::Fortress => {
                record.runs_allowed > 0
                    && f64::from(record.runs_allowed)
                        < IDENTITY_FORTRESS_RATIO * f64::from(record.runs_scored)
            }
            Self::Juggernaut => {
                record.wins >= IDENTITY_JUGGERNAUT_WINS
                    && record.losses <= IDENTITY_JUGGERNAUT_MAX_LOSSES
            }
            Self::Powerhouse => record.wins >= IDENTITY_POWERHOUSE_WINS,
            Self::MvpFactory => season.awards.team_has_mvp(&record.abbr),
            Self::Champion => season.is_champion(record.team_id),
            Self::ProspectPipeline => is_top_unit(record.farm_rank),
        }
    }
}

impl std::fmt::Display for IdentityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const fn is_top_unit(rank: u8) -> bool {
    rank >= 1 && rank <= IDENTITY_TOP_UNIT_RANK
}

/// Up to three tags for the season, in fixed priority order.
#[must_use]
pub fn identity_tags(record: &SeasonTeamRecord, season: &SeasonHistoryEntry) -> IdentityTagSet {
    IdentityTag::PRIORITY
        .into_iter()
        .filter(|tag| tag.applies(record, season))
        .take(IDENTITY_MAX_TAGS)
        .collect()
}
