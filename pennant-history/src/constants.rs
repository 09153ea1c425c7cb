//! Centralized scoring constants for the Pennant history engine.
//!
//! These values define the deterministic math behind every derived
//! analytic. Keeping them together ensures that formulas can only be
//! adjusted via code changes reviewed in version control, rather than
//! through external JSON configuration.

// Dominance score ----------------------------------------------------------
pub(crate) const DOMINANCE_WIN_WEIGHT: i64 = 2;
pub(crate) const DOMINANCE_CHAMPION_BONUS: i64 = 40;
pub(crate) const DOMINANCE_PLAYOFF_WIN_WEIGHT: i64 = 8;
pub(crate) const DOMINANCE_RUN_DIFF_DIVISOR: f64 = 5.0;
pub(crate) const DOMINANCE_RANK_BONUS_TOP: i64 = 12;
pub(crate) const DOMINANCE_RANK_BONUS_STEP: i64 = 3;
pub(crate) const DOMINANCE_RANK_BONUS_CUTOFF: u8 = 3;
pub(crate) const DOMINANCE_LOSING_PENALTY: i64 = 10;

// Dynasty index ------------------------------------------------------------
pub(crate) const DYNASTY_TITLE_WEIGHT: f64 = 120.0;
pub(crate) const DYNASTY_PLAYOFF_WIN_WEIGHT: f64 = 15.0;
pub(crate) const DYNASTY_WIN_PCT_WEIGHT: f64 = 50.0;
pub(crate) const DYNASTY_MVP_WEIGHT: f64 = 25.0;
pub(crate) const DYNASTY_CY_YOUNG_WEIGHT: f64 = 20.0;
pub(crate) const DYNASTY_RIVALRY_WEIGHT: f64 = 10.0;

// Longevity ----------------------------------------------------------------
pub(crate) const LONGEVITY_AVG_DOMINANCE_WEIGHT: f64 = 10.0;
pub(crate) const LONGEVITY_WINNING_SEASON_WEIGHT: f64 = 8.0;
pub(crate) const LONGEVITY_PLAYOFF_WEIGHT: f64 = 12.0;

// Identity tags ------------------------------------------------------------
pub(crate) const IDENTITY_TOP_UNIT_RANK: u8 = 3;
pub(crate) const IDENTITY_DOMINANT_RUN_DIFF: i64 = 120;
pub(crate) const IDENTITY_FORTRESS_RATIO: f64 = 0.75;
pub(crate) const IDENTITY_JUGGERNAUT_WINS: u32 = 100;
pub(crate) const IDENTITY_JUGGERNAUT_MAX_LOSSES: u32 = 62;
pub(crate) const IDENTITY_POWERHOUSE_WINS: u32 = 95;
pub(crate) const IDENTITY_MAX_TAGS: usize = 3;

// Hall of Seasons plaques --------------------------------------------------
pub(crate) const PLAQUE_DOMINANT_WINS: u32 = 105;
pub(crate) const PLAQUE_ELITE_WINS: u32 = 95;
pub(crate) const PLAQUE_RUN_DIFF_CALLOUT: i64 = 100;
pub(crate) const PLAQUE_MAX_DESCRIPTORS: usize = 4;
pub(crate) const PLAQUE_SEPARATOR: &str = " · ";

// Hall of Fame -------------------------------------------------------------
pub(crate) const HOF_VOTE_MULTIPLIER: f64 = 1.1;
pub(crate) const HOF_VOTE_FLOOR: f64 = 5.0;
pub(crate) const HOF_VOTE_CEILING: f64 = 100.0;
pub(crate) const HOF_LONGEVITY_PER_SEASON: f64 = 0.5;
pub(crate) const HOF_LONGEVITY_CAP: f64 = 10.0;

// Career ingestion ---------------------------------------------------------
pub(crate) const INGEST_MIN_PA: u32 = 10;
pub(crate) const INGEST_MIN_OUTS: u32 = 10;
pub(crate) const OUTS_PER_NINE: f64 = 27.0;
pub(crate) const OUTS_PER_INNING: f64 = 3.0;

// Seed derivation ----------------------------------------------------------
pub(crate) const BALLOT_DOMAIN_TAG: &[u8] = b"PENNANT-HOF-BALLOT";
