//! Best contiguous stretch of seasons for a franchise.
use serde::{Deserialize, Serialize};

use crate::config::PeakConfig;
use crate::dominance::season_dominance;
use crate::history::{SeasonHistoryEntry, TeamId};

/// The best window found; all zeros when history is shorter than a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeakPowerWindow {
    pub score: u32,
    pub start_year: u16,
    pub end_year: u16,
}

impl PeakPowerWindow {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.score == 0 && self.start_year == 0 && self.end_year == 0
    }
}

fn window_score(window: &[SeasonHistoryEntry], team_id: TeamId, title_bonus: u32) -> u64 {
    window
        .iter()
        .map(|season| {
            let title = if season.is_champion(team_id) {
                title_bonus
            } else {
                0
            };
            u64::from(season_dominance(season, team_id)) + u64::from(title)
        })
        .sum()
}

/// Slide a fixed-size window over chronological `history` and keep the
/// highest-scoring one. Ties keep the earliest window.
#[must_use]
pub fn peak_power(
    history: &[SeasonHistoryEntry],
    team_id: TeamId,
    cfg: &PeakConfig,
) -> PeakPowerWindow {
    let size = cfg.window.max(1);
    if history.len() < size {
        return PeakPowerWindow::default();
    }
    let mut best_score = 0_u64;
    let mut best_start = 0_usize;
    for (start, window) in history.windows(size).enumerate() {
        let score = window_score(window, team_id, cfg.title_bonus);
        if score > best_score {
            best_score = score;
            best_start = start;
        }
    }
    PeakPowerWindow {
        score: u32::try_from(best_score).unwrap_or(u32::MAX),
        start_year: history[best_start].year,
        end_year: history[best_start + size - 1].year,
    }
}
