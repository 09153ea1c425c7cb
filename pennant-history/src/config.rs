//! Tunable thresholds for the analytics engine.
//!
//! Formula weights live in [`crate::constants`]; this module only covers
//! the cut-offs and list sizes a save may reasonably override.
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration shared by every analytic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub eras: EraConfig,
    #[serde(default)]
    pub peak: PeakConfig,
    #[serde(default)]
    pub hall: HallConfig,
    #[serde(default)]
    pub hof: HofConfig,
    #[serde(default)]
    pub records: RecordConfig,
    #[serde(default)]
    pub milestones: MilestoneConfig,
}

impl AnalyticsConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.eras.validate()?;
        self.peak.validate()?;
        self.hall.validate()?;
        self.hof.validate()?;
        Ok(())
    }
}

/// Era detection thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraConfig {
    #[serde(default = "EraConfig::default_threshold")]
    pub threshold: u32,
    #[serde(default = "EraConfig::default_down_year_limit")]
    pub down_year_limit: u32,
    #[serde(default = "EraConfig::default_min_seasons")]
    pub min_seasons: u32,
    #[serde(default = "EraConfig::default_cap")]
    pub cap: usize,
}

impl EraConfig {
    const fn default_threshold() -> u32 {
        200
    }

    const fn default_down_year_limit() -> u32 {
        2
    }

    const fn default_min_seasons() -> u32 {
        2
    }

    const fn default_cap() -> usize {
        10
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.down_year_limit < 1 {
            return Err(ConfigError::MinViolation {
                field: "eras.down_year_limit",
                min: 1,
                value: self.down_year_limit,
            });
        }
        if self.min_seasons < 2 {
            return Err(ConfigError::MinViolation {
                field: "eras.min_seasons",
                min: 2,
                value: self.min_seasons,
            });
        }
        Ok(())
    }
}

impl Default for EraConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            down_year_limit: Self::default_down_year_limit(),
            min_seasons: Self::default_min_seasons(),
            cap: Self::default_cap(),
        }
    }
}

/// Peak power window sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakConfig {
    #[serde(default = "PeakConfig::default_window")]
    pub window: usize,
    #[serde(default = "PeakConfig::default_title_bonus")]
    pub title_bonus: u32,
}

impl PeakConfig {
    const fn default_window() -> usize {
        5
    }

    const fn default_title_bonus() -> u32 {
        30
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 {
            return Err(ConfigError::MinViolation {
                field: "peak.window",
                min: 1,
                value: 0,
            });
        }
        Ok(())
    }
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            window: Self::default_window(),
            title_bonus: Self::default_title_bonus(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallConfig {
    #[serde(default = "HallConfig::default_size")]
    pub size: usize,
}

impl HallConfig {
    const fn default_size() -> usize {
        20
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::MinViolation {
                field: "hall.size",
                min: 1,
                value: 0,
            });
        }
        Ok(())
    }
}

impl Default for HallConfig {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
        }
    }
}

/// Hall of Fame eligibility and voting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HofConfig {
    #[serde(default = "HofConfig::default_min_seasons")]
    pub min_seasons: u32,
    #[serde(default = "HofConfig::default_min_score")]
    pub min_score: u32,
    #[serde(default = "HofConfig::default_induction_vote")]
    pub induction_vote: f64,
    #[serde(default = "HofConfig::default_noise")]
    pub noise: f64,
    #[serde(default = "HofConfig::default_delay_years")]
    pub delay_years: u16,
}

impl HofConfig {
    const fn default_min_seasons() -> u32 {
        5
    }

    const fn default_min_score() -> u32 {
        30
    }

    const fn default_induction_vote() -> f64 {
        75.0
    }

    const fn default_noise() -> f64 {
        7.5
    }

    const fn default_delay_years() -> u16 {
        5
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(5.0..=100.0).contains(&self.induction_vote) {
            return Err(ConfigError::RangeViolation {
                field: "hof.induction_vote",
                min: 5.0,
                max: 100.0,
                value: self.induction_vote,
            });
        }
        if !(0.0..=50.0).contains(&self.noise) {
            return Err(ConfigError::RangeViolation {
                field: "hof.noise",
                min: 0.0,
                max: 50.0,
                value: self.noise,
            });
        }
        if self.min_seasons < 1 {
            return Err(ConfigError::MinViolation {
                field: "hof.min_seasons",
                min: 1,
                value: self.min_seasons,
            });
        }
        Ok(())
    }
}

impl Default for HofConfig {
    fn default() -> Self {
        Self {
            min_seasons: Self::default_min_seasons(),
            min_score: Self::default_min_score(),
            induction_vote: Self::default_induction_vote(),
            noise: Self::default_noise(),
            delay_years: Self::default_delay_years(),
        }
    }
}

/// Sample-size gates for rate-stat leaderboards and franchise records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordConfig {
    /// Career at-bats must exceed this for the batting average board.
    #[serde(default = "RecordConfig::default_leader_min_ab")]
    pub leader_min_ab: u32,
    /// Career outs must exceed this for the ERA board.
    #[serde(default = "RecordConfig::default_leader_min_outs")]
    pub leader_min_outs: u32,
    /// Season at-bats needed for a franchise batting average record.
    #[serde(default = "RecordConfig::default_franchise_min_ab")]
    pub franchise_min_ab: u32,
    /// Season outs needed for a franchise ERA record.
    #[serde(default = "RecordConfig::default_franchise_min_outs")]
    pub franchise_min_outs: u32,
}

impl RecordConfig {
    const fn default_leader_min_ab() -> u32 {
        300
    }

    const fn default_leader_min_outs() -> u32 {
        100
    }

    const fn default_franchise_min_ab() -> u32 {
        300
    }

    const fn default_franchise_min_outs() -> u32 {
        300
    }
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            leader_min_ab: Self::default_leader_min_ab(),
            leader_min_outs: Self::default_leader_min_outs(),
            franchise_min_ab: Self::default_franchise_min_ab(),
            franchise_min_outs: Self::default_franchise_min_outs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneConfig {
    #[serde(default = "MilestoneConfig::default_log_limit")]
    pub log_limit: usize,
}

impl MilestoneConfig {
    const fn default_log_limit() -> usize {
        200
    }
}

impl Default for MilestoneConfig {
    fn default() -> Self {
        Self {
            log_limit: Self::default_log_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg = AnalyticsConfig::from_json("{}").unwrap();
        assert_eq!(cfg, AnalyticsConfig::default());
        assert_eq!(cfg.eras.threshold, 200);
        assert_eq!(cfg.peak.window, 5);
        assert_eq!(cfg.hall.size, 20);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = AnalyticsConfig::from_json(r#"{"eras":{"threshold":180},"hof":{"noise":0.0}}"#)
            .unwrap();
        assert_eq!(cfg.eras.threshold, 180);
        assert_eq!(cfg.eras.down_year_limit, 2);
        assert!(cfg.hof.noise.abs() < f64::EPSILON);
        assert_eq!(cfg.hof.delay_years, 5);
    }

    #[test]
    fn single_season_eras_are_rejected() {
        let mut cfg = AnalyticsConfig::default();
        cfg.eras.min_seasons = 1;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MinViolation {
                field: "eras.min_seasons",
                min: 2,
                value: 1,
            })
        );
    }

    #[test]
    fn induction_vote_out_of_range_is_rejected() {
        let mut cfg = AnalyticsConfig::default();
        cfg.hof.induction_vote = 120.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RangeViolation {
                field: "hof.induction_vote",
                ..
            })
        ));
    }

    #[test]
    fn zero_peak_window_is_rejected() {
        let mut cfg = AnalyticsConfig::default();
        cfg.peak.window = 0;
        assert!(cfg.validate().is_err());
    }
}
