//! Hall of Fame scoring and the simulated writers' vote.
//!
//! Evaluation never touches the career store: candidates carry a
//! projected induction, and the caller commits those through
//! [`CareerRecordStore::commit_inductions`].
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::career::{CareerRecord, CareerRecordStore, HofInduction};
use crate::config::HofConfig;
use crate::constants::{
    HOF_LONGEVITY_CAP, HOF_LONGEVITY_PER_SEASON, HOF_VOTE_CEILING, HOF_VOTE_FLOOR,
    HOF_VOTE_MULTIPLIER,
};
use crate::history::PlayerId;
use crate::numbers::{round_f64_to_u32, round_tenths};

/// A retired player offered to the ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retiree {
    pub player_id: PlayerId,
    pub position: String,
    pub is_pitcher: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HofCandidate {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub is_pitcher: bool,
    pub seasons: u32,
    pub last_year: u16,
    /// Worthiness, 0-100.
    pub hof_score: u32,
    pub vote_pct: f64,
    pub projected_induction: Option<HofInduction>,
}

/// `value / benchmark * weight`, never above `weight`.
fn capped(value: f64, benchmark: f64, weight: f64) -> f64 {
    (value / benchmark * weight).min(weight)
}

fn longevity_points(seasons: u32) -> f64 {
    (f64::from(seasons) * HOF_LONGEVITY_PER_SEASON).min(HOF_LONGEVITY_CAP)
}

fn era_band(record: &CareerRecord) -> f64 {
    if record.outs == 0 {
        return 0.0;
    }
    match record.era() {
        era if era < 2.75 => 15.0,
        era if era < 3.25 => 10.0,
        era if era < 3.75 => 5.0,
        _ => 0.0,
    }
}

fn average_band(record: &CareerRecord) -> f64 {
    if record.ab == 0 {
        return 0.0;
    }
    match record.avg() {
        avg if avg >= 0.300 => 10.0,
        avg if avg >= 0.285 => 6.0,
        avg if avg >= 0.270 => 3.0,
        _ => 0.0,
    }
}

fn pitcher_points(record: &CareerRecord) -> f64 {
    capped(f64::from(record.w), 300.0, 30.0)
        + capped(f64::from(record.k), 3000.0, 20.0)
        + capped(f64::from(record.sv), 400.0, 15.0)
        + capped(record.innings_pitched(), 3000.0, 10.0)
        + era_band(record)
        + longevity_points(record.seasons)
}

fn hitter_points(record: &CareerRecord) -> f64 {
    capped(f64::from(record.h), 3000.0, 30.0)
        + capped(f64::from(record.hr), 500.0, 25.0)
        + capped(f64::from(record.rbi), 1500.0, 15.0)
        + capped(f64::from(record.sb), 400.0, 5.0)
        + average_band(record)
        + capped(f64::from(record.r), 1500.0, 5.0)
        + longevity_points(record.seasons)
}

/// Worthiness on a 0-100 scale using the pitcher or hitter formula.
#[must_use]
pub fn hof_score(record: &CareerRecord, is_pitcher: bool) -> u32 {
    let raw = if is_pitcher {
        pitcher_points(record)
    } else {
        hitter_points(record)
    };
    round_f64_to_u32(raw).min(100)
}

/// Simulated vote share for a score, clamped to 5-100 and kept to one
/// decimal place.
pub fn simulate_vote<R: Rng + ?Sized>(score: u32, cfg: &HofConfig, rng: &mut R) -> f64 {
    let noise = if cfg.noise > 0.0 {
        rng.gen_range(-cfg.noise..=cfg.noise)
    } else {
        0.0
    };
    let vote = f64::from(score).mul_add(HOF_VOTE_MULTIPLIER, noise);
    round_tenths(vote.clamp(HOF_VOTE_FLOOR, HOF_VOTE_CEILING))
}

/// Scores retirees against one ballot configuration.
#[derive(Debug, Clone, Copy)]
pub struct HofEvaluator<'a> {
    cfg: &'a HofConfig,
}

impl<'a> HofEvaluator<'a> {
    #[must_use]
    pub const fn new(cfg: &'a HofConfig) -> Self {
        Self { cfg }
    }

    /// Whether a career is long enough, and not yet inducted, to appear
    /// on a ballot.
    #[must_use]
    pub fn is_eligible(&self, record: &CareerRecord) -> bool {
        record.seasons >= self.cfg.min_seasons && !record.hof_inducted
    }

    /// Score every eligible retiree and simulate their vote. Candidates
    /// are returned highest score first; those under the score floor are
    /// dropped.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        careers: &CareerRecordStore,
        retirees: &[Retiree],
        rng: &mut R,
    ) -> Vec<HofCandidate> {
        let cfg = self.cfg;
        let mut candidates = Vec::new();
        for retiree in retirees {
            let Some(record) = careers.get(retiree.player_id) else {
                continue;
            };
            if !self.is_eligible(record) {
                continue;
            }
            let score = hof_score(record, retiree.is_pitcher);
            if score < cfg.min_score {
                continue;
            }
            let vote_pct = simulate_vote(score, cfg, rng);
            let projected_induction = (vote_pct >= cfg.induction_vote).then(|| HofInduction {
                player_id: record.player_id,
                year: record.last_year.saturating_add(cfg.delay_years),
                vote_pct,
            });
            candidates.push(HofCandidate {
                player_id: record.player_id,
                name: record.name.clone(),
                position: retiree.position.clone(),
                is_pitcher: retiree.is_pitcher,
                seasons: record.seasons,
                last_year: record.last_year,
                hof_score: score,
                vote_pct,
                projected_induction,
            });
        }
        candidates.sort_by(|a, b| b.hof_score.cmp(&a.hof_score));
        candidates
    }
}

/// Inductions projected by an evaluation, ready to commit.
#[must_use]
pub fn inductions(candidates: &[HofCandidate]) -> Vec<HofInduction> {
    candidates
        .iter()
        .filter_map(|candidate| candidate.projected_induction.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::SeasonStatLine;
    use crate::career::tests::{hitter_line, pitcher_line};
    use crate::history::SeasonAwards;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn career_of(lines: impl IntoIterator<Item = SeasonStatLine>) -> CareerRecordStore {
        let mut store = CareerRecordStore::new();
        for line in lines {
            store
                .record_season_stats(line.year, &[line], &SeasonAwards::default())
                .unwrap();
        }
        store
    }

    fn quiet() -> HofConfig {
        HofConfig {
            noise: 0.0,
            ..HofConfig::default()
        }
    }

    fn hitter(id: PlayerId) -> Retiree {
        Retiree {
            player_id: id,
            position: "SS".to_string(),
            is_pitcher: false,
        }
    }

    #[test]
    fn short_careers_are_never_considered() {
        let store = career_of((2001..=2004).map(|y| SeasonStatLine {
            hr: 60,
            ..hitter_line(1, y, "SF")
        }));
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let candidates = HofEvaluator::new(&quiet()).evaluate(&store, &[hitter(1)], &mut rng);
        assert!(candidates.is_empty());
    }

    #[test]
    fn hitter_formula_caps_each_category() {
        // 20 seasons: 3360 h, 500 hr, 1800 rbi, 240 sb, .300 avg, 1760 r
        let store = career_of((2001..=2020).map(|y| hitter_line(1, y, "STL")));
        let record = store.get(1).unwrap();
        // 30 + 25 + 15 + 3 + 10 + 5 + 10
        assert_eq!(hof_score(record, false), 98);
    }

    #[test]
    fn pitcher_formula_rewards_low_era() {
        // 12 seasons: 180 w, 2520 k, 2400 ip, 2.97 era
        let store = career_of((2001..=2012).map(|y| pitcher_line(2, y, "ATL")));
        let record = store.get(2).unwrap();
        // 18 + 16.8 + 0 + 8 + 10 + 6
        assert_eq!(hof_score(record, true), 59);
    }

    #[test]
    fn quiet_vote_is_score_times_multiplier() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        assert!((simulate_vote(70, &quiet(), &mut rng) - 77.0).abs() < 1e-9);
        assert!((simulate_vote(2, &quiet(), &mut rng) - 5.0).abs() < 1e-9);
        assert!((simulate_vote(100, &quiet(), &mut rng) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn noisy_vote_stays_within_band() {
        let cfg = HofConfig::default();
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        for _ in 0..200 {
            let vote = simulate_vote(50, &cfg, &mut rng);
            assert!((47.5..=62.5).contains(&vote), "vote {vote} escaped band");
        }
    }

    #[test]
    fn evaluation_projects_but_does_not_apply() {
        let store = career_of((2001..=2020).map(|y| hitter_line(1, y, "STL")));
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let candidates = HofEvaluator::new(&quiet()).evaluate(&store, &[hitter(1)], &mut rng);
        assert_eq!(candidates.len(), 1);
        let induction = candidates[0].projected_induction.clone().unwrap();
        assert_eq!(induction.year, 2025);
        assert!(!store.get(1).unwrap().hof_inducted);
        assert_eq!(inductions(&candidates), vec![induction]);
    }

    #[test]
    fn inducted_players_are_not_reevaluated() {
        let mut store = career_of((2001..=2020).map(|y| hitter_line(1, y, "STL")));
        store.commit_inductions(&[HofInduction {
            player_id: 1,
            year: 2025,
            vote_pct: 90.0,
        }]);
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        assert!(HofEvaluator::new(&quiet()).evaluate(&store, &[hitter(1)], &mut rng).is_empty());
    }

    #[test]
    fn weak_candidates_fall_off_and_order_is_by_score() {
        let mut lines: Vec<SeasonStatLine> =
            (2001..=2020).map(|y| hitter_line(1, y, "STL")).collect();
        lines.extend((2001..=2006).map(|y| SeasonStatLine {
            h: 60,
            ab: 300,
            hr: 2,
            rbi: 20,
            r: 25,
            sb: 0,
            ..hitter_line(2, y, "MIA")
        }));
        lines.extend((2001..=2010).map(|y| SeasonStatLine {
            h: 150,
            hr: 30,
            ..hitter_line(3, y, "MIL")
        }));
        let mut store = CareerRecordStore::new();
        for year in 2001..=2020 {
            let season: Vec<SeasonStatLine> =
                lines.iter().filter(|l| l.year == year).cloned().collect();
            store
                .record_season_stats(year, &season, &SeasonAwards::default())
                .unwrap();
        }
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let cfg = quiet();
        let candidates =
            HofEvaluator::new(&cfg).evaluate(&store, &[hitter(2), hitter(3), hitter(1)], &mut rng);
        let ids: Vec<PlayerId> = candidates.iter().map(|c| c.player_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
