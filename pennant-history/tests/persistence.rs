use std::hash::Hasher;

use pennant_history::{
    AnalyticsConfig, AwardKind, AwardWinner, CareerRecordStore, Chronicle, ChronicleSave,
    HistoryError, LeaderStat, Retiree, SeasonAwards, SeasonStatLine, SeasonTeamRecord,
    TransactionKind,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use twox_hash::XxHash64;

const ABBRS: [&str; 6] = ["BOS", "NYY", "TOR", "BAL", "TB", "CLE"];

fn digest(bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(bytes);
    hasher.finish()
}

/// Six teams, three players each, stats drawn from a seeded stream.
fn build_league(seed: u64, seasons: u16) -> Chronicle {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut chronicle = Chronicle::new(AnalyticsConfig::default(), seed);
    for year in 2001..2001 + seasons {
        let mut rollover = chronicle.begin_season(year);
        let mut best = (0_u32, 0_u32);
        let mut lines = Vec::new();
        for (team_id, abbr) in (1_u32..).zip(ABBRS) {
            let wins = rng.gen_range(60..=110);
            if wins > best.1 {
                best = (team_id, wins);
            }
            rollover.record_team_record(SeasonTeamRecord {
                team_id,
                abbr: abbr.to_string(),
                name: format!("{abbr} Club"),
                wins,
                losses: 162 - wins,
                runs_scored: rng.gen_range(580..=900),
                runs_allowed: rng.gen_range(580..=900),
                playoff_wins: rng.gen_range(0..=4),
                offense_rank: rng.gen_range(1..=6),
                pitching_rank: rng.gen_range(1..=6),
                farm_rank: rng.gen_range(1..=6),
            });
            let base = team_id * 10;
            for slot in 0..2 {
                let ab = rng.gen_range(350..=620);
                lines.push(SeasonStatLine {
                    player_id: base + slot,
                    year,
                    name: format!("Hitter {}", base + slot),
                    team: abbr.to_string(),
                    position: "OF".to_string(),
                    g: 140,
                    pa: ab + 50,
                    ab,
                    h: ab * rng.gen_range(230..=330) / 1000,
                    hr: rng.gen_range(5..=45),
                    rbi: rng.gen_range(40..=130),
                    r: rng.gen_range(40..=120),
                    sb: rng.gen_range(0..=40),
                    ..SeasonStatLine::default()
                });
            }
            lines.push(SeasonStatLine {
                player_id: base + 2,
                year,
                name: format!("Pitcher {}", base + 2),
                team: abbr.to_string(),
                position: "SP".to_string(),
                is_pitcher: true,
                g: 32,
                gs: 32,
                w: rng.gen_range(6..=22),
                l: rng.gen_range(5..=15),
                outs: rng.gen_range(450..=700),
                er: rng.gen_range(45..=110),
                k: rng.gen_range(120..=280),
                ..SeasonStatLine::default()
            });
        }
        let mut awards = SeasonAwards::default();
        awards.set(
            AwardKind::MvpAl,
            AwardWinner {
                player_id: best.0 * 10,
                name: format!("Hitter {}", best.0 * 10),
                team: ABBRS[usize::try_from(best.0 - 1).unwrap()].to_string(),
                position: "OF".to_string(),
            },
        );
        rollover
            .record_champion(best.0)
            .record_season_awards(awards)
            .record_season_stats(lines);
        chronicle.commit(rollover).unwrap();
        if year % 4 == 0 {
            chronicle.record_transaction(
                year,
                TransactionKind::Extension,
                ABBRS[usize::from(year % 6)],
                None,
                "Extended the manager",
            );
        }
    }
    chronicle
}

fn analytics_fingerprint(chronicle: &Chronicle) -> String {
    let mut parts = Vec::new();
    for team_id in 1..=6 {
        let profile = chronicle.dynasty_profile(team_id).unwrap();
        parts.push(serde_json::to_string(&profile).unwrap());
    }
    parts.push(serde_json::to_string(&chronicle.eras()).unwrap());
    parts.push(serde_json::to_string(&chronicle.hall_of_seasons()).unwrap());
    for stat in LeaderStat::ALL {
        parts.push(serde_json::to_string(&chronicle.all_time_leaders(stat, 5)).unwrap());
    }
    parts.join("\n")
}

#[test]
fn identical_seeds_produce_identical_analytics() {
    let a = analytics_fingerprint(&build_league(0x00C0_FFEE, 20));
    let b = analytics_fingerprint(&build_league(0x00C0_FFEE, 20));
    assert_eq!(digest(a.as_bytes()), digest(b.as_bytes()));
    let c = analytics_fingerprint(&build_league(0x0BAD_CAFE, 20));
    assert_ne!(digest(a.as_bytes()), digest(c.as_bytes()));
}

#[test]
fn career_entries_round_trip_structurally() {
    let chronicle = build_league(7, 8);
    let snapshot = chronicle.snapshot();
    let careers = &snapshot.careers;
    let mut restored = CareerRecordStore::new();
    restored.restore(careers.entries());
    assert_eq!(&restored, careers);
}

#[test]
fn json_save_restores_identical_analytics() {
    let original = build_league(0xFACE_B00C, 16);
    let json = original.to_json().unwrap();

    let mut restored = Chronicle::new(AnalyticsConfig::default(), 1);
    restored.restore_json(&json).unwrap();
    assert_eq!(*restored.snapshot(), *original.snapshot());
    assert_eq!(
        digest(analytics_fingerprint(&restored).as_bytes()),
        digest(analytics_fingerprint(&original).as_bytes())
    );
    assert_eq!(restored.transactions(None, 100), original.transactions(None, 100));
}

#[test]
fn restored_session_replays_the_same_ballot() {
    let retirees: Vec<Retiree> = (1..=6)
        .flat_map(|team: u32| {
            [
                Retiree {
                    player_id: team * 10,
                    position: "OF".to_string(),
                    is_pitcher: false,
                },
                Retiree {
                    player_id: team * 10 + 2,
                    position: "SP".to_string(),
                    is_pitcher: true,
                },
            ]
        })
        .collect();
    let mut original = build_league(99, 15);
    let save = original.save();
    let mut replay = Chronicle::new(AnalyticsConfig::default(), 0);
    replay.restore(save).unwrap();

    let first = original.run_hof_ballot(2016, &retirees);
    let second = replay.run_hof_ballot(2016, &retirees);
    assert_eq!(first, second);
    assert_eq!(*original.snapshot(), *replay.snapshot());
}

#[test]
fn restore_rejects_out_of_order_history() {
    let chronicle = build_league(5, 3);
    let mut save: ChronicleSave = chronicle.save();
    save.seasons.swap(0, 2);
    let mut target = build_league(6, 2);
    let before = target.snapshot();
    let err = target.restore(save).unwrap_err();
    assert!(matches!(err, HistoryError::SeasonOutOfOrder { .. }));
    assert_eq!(*target.snapshot(), *before);
}
