//! Seeded league synthesis.
//!
//! Stands in for the season simulation: every year it produces the team
//! records, awards, champion and stat lines the history engine ingests,
//! plus the trades and retirements that feed the transaction log and the
//! Hall of Fame ballot.
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use pennant_history::{
    AnalyticsConfig, AwardKind, AwardWinner, BallotResult, Chronicle, PlayerId, Retiree,
    SeasonAwards, SeasonStatLine, SeasonTeamRecord, TeamId, TransactionKind,
};

pub const FIRST_YEAR: u16 = 2001;
pub const MAX_TEAMS: usize = 30;

const GAMES: u32 = 162;
const HITTERS_PER_TEAM: usize = 6;
const STARTERS_PER_TEAM: usize = 2;
const RELIEVERS_PER_TEAM: usize = 1;
const TRADE_CHANCE: f64 = 0.04;

const FRANCHISES: [(&str, &str); MAX_TEAMS] = [
    ("BOS", "Boston Pilgrims"),
    ("NYH", "New York Highlanders"),
    ("BAL", "Baltimore Orioles"),
    ("TOR", "Toronto Maples"),
    ("TBR", "Tampa Bay Rays"),
    ("CLE", "Cleveland Spiders"),
    ("DET", "Detroit Wolverines"),
    ("CHW", "Chicago White Stockings"),
    ("KCM", "Kansas City Monarchs"),
    ("MIN", "Minneapolis Millers"),
    ("HOU", "Houston Buffs"),
    ("SEA", "Seattle Rainiers"),
    ("OAK", "Oakland Oaks"),
    ("LAA", "Los Angeles Angels"),
    ("TEX", "Texas Rangers"),
    ("PHI", "Philadelphia Quakers"),
    ("ATL", "Atlanta Crackers"),
    ("WAS", "Washington Senators"),
    ("NYG", "New York Gothams"),
    ("MIA", "Miami Marlins"),
    ("STL", "St. Louis Browns"),
    ("CIN", "Cincinnati Red Stockings"),
    ("PIT", "Pittsburgh Alleghenys"),
    ("MIL", "Milwaukee Brewers"),
    ("CHC", "Chicago Orphans"),
    ("LAD", "Los Angeles Trolleys"),
    ("SFS", "San Francisco Seals"),
    ("SDP", "San Diego Padres"),
    ("DEN", "Denver Bears"),
    ("PHX", "Phoenix Firebirds"),
];

const HITTER_POSITIONS: [&str; HITTERS_PER_TEAM] = ["C", "1B", "2B", "SS", "3B", "OF"];

/// League shape for one synthesized history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaguePlan {
    pub teams: usize,
    pub seasons: u16,
}

impl LeaguePlan {
    #[must_use]
    pub fn new(teams: usize, seasons: u16) -> Self {
        Self {
            teams: teams.clamp(2, MAX_TEAMS),
            seasons,
        }
    }

    #[must_use]
    pub fn last_year(&self) -> u16 {
        FIRST_YEAR + self.seasons.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Hitter,
    Starter,
    Reliever,
}

#[derive(Debug, Clone)]
struct Player {
    id: PlayerId,
    name: String,
    position: &'static str,
    role: Role,
    team: usize,
    /// 0..=40; shifts every rate the player produces.
    talent: u32,
    seasons_left: u32,
    rookie: bool,
}

impl Player {
    const fn is_pitcher(&self) -> bool {
        !matches!(self.role, Role::Hitter)
    }

    fn retiree(&self) -> Retiree {
        Retiree {
            player_id: self.id,
            position: self.position.to_string(),
            is_pitcher: self.is_pitcher(),
        }
    }
}

/// A committed synthetic history and everything the ballots produced.
#[derive(Debug, Clone)]
pub struct LeagueRun {
    pub seed: u64,
    pub plan: LeaguePlan,
    pub chronicle: Chronicle,
    pub retirees: Vec<Retiree>,
    pub ballots: Vec<BallotResult>,
}

impl LeagueRun {
    /// Team id currently using `abbr`, matched case-insensitively.
    #[must_use]
    pub fn team_id(&self, abbr: &str) -> Option<TeamId> {
        let snapshot = self.chronicle.snapshot();
        snapshot.history.seasons().last().and_then(|season| {
            season
                .team_records
                .iter()
                .find(|record| record.abbr.eq_ignore_ascii_case(abbr))
                .map(|record| record.team_id)
        })
    }
}

pub struct LeagueGenerator {
    rng: ChaCha20Rng,
    plan: LeaguePlan,
    players: Vec<Player>,
    next_id: PlayerId,
    verbose: bool,
}

impl LeagueGenerator {
    #[must_use]
    pub fn new(plan: LeaguePlan, seed: u64, verbose: bool) -> Self {
        let mut generator = Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            plan,
            players: Vec::new(),
            next_id: 1,
            verbose,
        };
        for team in 0..plan.teams {
            for position in HITTER_POSITIONS {
                generator.sign(team, position, Role::Hitter, false);
            }
            for _ in 0..STARTERS_PER_TEAM {
                generator.sign(team, "SP", Role::Starter, false);
            }
            for _ in 0..RELIEVERS_PER_TEAM {
                generator.sign(team, "RP", Role::Reliever, false);
            }
        }
        generator
    }

    fn sign(&mut self, team: usize, position: &'static str, role: Role, rookie: bool) -> PlayerId {
        let id = self.next_id;
        self.next_id += 1;
        let career = if rookie {
            self.rng.gen_range(3..=19)
        } else {
            self.rng.gen_range(1..=14)
        };
        self.players.push(Player {
            id,
            name: format!("Player {id}"),
            position,
            role,
            team,
            talent: self.rng.gen_range(0..=40),
            seasons_left: career,
            rookie,
        });
        id
    }

    /// Synthesize and commit every season of the plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the history engine rejects a synthesized
    /// season, which means the generator broke the ingestion contract.
    pub fn run(mut self, seed: u64, config: AnalyticsConfig) -> Result<LeagueRun> {
        let mut chronicle = Chronicle::new(config, seed);
        let mut retirees = Vec::new();
        let mut ballots = Vec::new();
        for year in FIRST_YEAR..=self.plan.last_year() {
            let mut records = self.team_records();
            let champion = self.playoffs(&mut records);
            let lines = self.stat_lines(year);
            let awards = self.awards(&lines);

            let mut rollover = chronicle.begin_season(year);
            for record in records {
                rollover.record_team_record(record);
            }
            rollover
                .record_champion(champion)
                .record_season_awards(awards)
                .record_season_stats(lines);
            let summary = chronicle
                .commit(rollover)
                .with_context(|| format!("season {year} rejected"))?;
            if self.verbose {
                log::info!(
                    "season {year}: {} teams, {} careers updated, {} milestones",
                    summary.teams,
                    summary.ingest.created + summary.ingest.updated,
                    summary.milestones.len()
                );
            }

            let retired = self.offseason(&mut chronicle, year);
            if !retired.is_empty() {
                ballots.push(chronicle.run_hof_ballot(year, &retired));
            }
            retirees.extend(retired);
        }
        Ok(LeagueRun {
            seed: chronicle.session_seed(),
            plan: self.plan,
            chronicle,
            retirees,
            ballots,
        })
    }

    fn team_records(&mut self) -> Vec<SeasonTeamRecord> {
        let mut records: Vec<SeasonTeamRecord> = (0..self.plan.teams)
            .map(|idx| {
                let wins = self.rng.gen_range(58..=108);
                let lean = (i64::from(wins) - 81) * 5;
                let scored = 690 + lean + self.rng.gen_range(-45..=45);
                let allowed = 690 - lean + self.rng.gen_range(-45..=45);
                let (abbr, name) = FRANCHISES[idx];
                SeasonTeamRecord {
                    team_id: team_id(idx),
                    abbr: abbr.to_string(),
                    name: name.to_string(),
                    wins,
                    losses: GAMES - wins,
                    runs_scored: u32::try_from(scored.max(350)).unwrap_or(350),
                    runs_allowed: u32::try_from(allowed.max(350)).unwrap_or(350),
                    playoff_wins: 0,
                    offense_rank: 0,
                    pitching_rank: 0,
                    farm_rank: 0,
                }
            })
            .collect();

        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by_key(|&idx| std::cmp::Reverse(records[idx].runs_scored));
        for (rank, &idx) in order.iter().enumerate() {
            records[idx].offense_rank = rank_u8(rank);
        }
        order.sort_by_key(|&idx| records[idx].runs_allowed);
        for (rank, &idx) in order.iter().enumerate() {
            records[idx].pitching_rank = rank_u8(rank);
        }
        order.shuffle(&mut self.rng);
        for (rank, &idx) in order.iter().enumerate() {
            records[idx].farm_rank = rank_u8(rank);
        }
        records
    }

    /// Seed the top four by wins, hand out playoff wins and pick a champion.
    fn playoffs(&mut self, records: &mut [SeasonTeamRecord]) -> TeamId {
        let mut seeds: Vec<usize> = (0..records.len()).collect();
        seeds.sort_by_key(|&idx| std::cmp::Reverse(records[idx].wins));
        seeds.truncate(4);
        let champion = seeds[self.rng.gen_range(0..seeds.len())];
        for &idx in &seeds {
            records[idx].playoff_wins = if idx == champion {
                11
            } else {
                self.rng.gen_range(1..=7)
            };
        }
        records[champion].team_id
    }

    fn stat_lines(&mut self, year: u16) -> Vec<SeasonStatLine> {
        let mut lines = Vec::with_capacity(self.players.len());
        for idx in 0..self.players.len() {
            let player = self.players[idx].clone();
            let team = FRANCHISES[player.team].0.to_string();
            let line = match player.role {
                Role::Hitter => self.hitter_line(&player, year, team),
                Role::Starter | Role::Reliever => self.pitcher_line(&player, year, team),
            };
            lines.push(line);
        }
        lines
    }

    fn hitter_line(&mut self, player: &Player, year: u16, team: String) -> SeasonStatLine {
        let rng = &mut self.rng;
        let ab = rng.gen_range(380..=610);
        let avg_milli = rng.gen_range(215..=295) + player.talent;
        let h = ab * avg_milli / 1000;
        let hr = rng.gen_range(2..=28) + player.talent / 2;
        SeasonStatLine {
            player_id: player.id,
            year,
            name: player.name.clone(),
            team,
            position: player.position.to_string(),
            is_pitcher: false,
            g: rng.gen_range(110..=160),
            pa: ab + rng.gen_range(35..=80),
            ab,
            h,
            doubles: h / 5,
            triples: rng.gen_range(0..=6),
            hr,
            rbi: hr * 2 + rng.gen_range(20..=60),
            bb: rng.gen_range(25..=90),
            so: rng.gen_range(60..=170),
            sb: rng.gen_range(0..=35),
            r: h / 2 + rng.gen_range(0..=25),
            ..SeasonStatLine::default()
        }
    }

    fn pitcher_line(&mut self, player: &Player, year: u16, team: String) -> SeasonStatLine {
        let rng = &mut self.rng;
        let starter = player.role == Role::Starter;
        let outs = if starter {
            rng.gen_range(420..=660)
        } else {
            rng.gen_range(150..=240)
        };
        let era_centi = rng.gen_range(260..=520) - player.talent * 3;
        let er = outs * era_centi / 2700;
        let (w, l, gs, g, sv) = if starter {
            let w = rng.gen_range(5..=14) + player.talent / 5;
            (w, rng.gen_range(5..=14), 32, 32, 0)
        } else {
            (
                rng.gen_range(1..=7),
                rng.gen_range(1..=6),
                0,
                rng.gen_range(55..=72),
                rng.gen_range(5..=30) + player.talent / 4,
            )
        };
        SeasonStatLine {
            player_id: player.id,
            year,
            name: player.name.clone(),
            team,
            position: player.position.to_string(),
            is_pitcher: true,
            g,
            gs,
            w,
            l,
            sv,
            outs,
            er,
            h_allowed: outs * 8 / 27 + rng.gen_range(0..=20),
            bb_allowed: outs / 9 + rng.gen_range(0..=15),
            k: outs * rng.gen_range(6..=11) / 27 + player.talent,
            ..SeasonStatLine::default()
        }
    }

    /// Even-indexed teams play in the AL, odd-indexed in the NL.
    fn awards(&self, lines: &[SeasonStatLine]) -> SeasonAwards {
        let mut awards = SeasonAwards::default();
        for (al, mvp, cy, rookie) in [
            (true, AwardKind::MvpAl, AwardKind::CyYoungAl, AwardKind::RookieAl),
            (false, AwardKind::MvpNl, AwardKind::CyYoungNl, AwardKind::RookieNl),
        ] {
            let league: Vec<(&Player, &SeasonStatLine)> = self
                .players
                .iter()
                .zip(lines)
                .filter(|(player, _)| (player.team % 2 == 0) == al)
                .collect();
            if let Some((player, line)) = league
                .iter()
                .filter(|(player, _)| !player.is_pitcher())
                .max_by_key(|(_, line)| line.hr * 4 + line.h + line.rbi)
            {
                awards.set(mvp, winner(player, line));
            }
            if let Some((player, line)) = league
                .iter()
                .filter(|(player, _)| player.role == Role::Starter)
                .max_by_key(|(_, line)| (line.w * 20 + line.k).saturating_sub(line.er * 2))
            {
                awards.set(cy, winner(player, line));
            }
            if let Some((player, line)) = league
                .iter()
                .filter(|(player, _)| player.rookie)
                .max_by_key(|(_, line)| line.h + line.k)
            {
                awards.set(rookie, winner(player, line));
            }
        }
        awards
    }

    /// Age the league: retire expiring careers, call up replacements and
    /// shuffle a few hitters between clubs. Returns this year's retirees.
    fn offseason(&mut self, chronicle: &mut Chronicle, year: u16) -> Vec<Retiree> {
        let mut retired = Vec::new();
        let mut replacements = Vec::new();
        for player in &mut self.players {
            player.rookie = false;
            player.seasons_left = player.seasons_left.saturating_sub(1);
            if player.seasons_left == 0 {
                chronicle.record_transaction(
                    year,
                    TransactionKind::Retirement,
                    FRANCHISES[player.team].0,
                    Some(player.id),
                    &format!("{} retired", player.name),
                );
                retired.push(player.retiree());
                replacements.push((player.team, player.position, player.role));
            }
        }
        self.players.retain(|player| player.seasons_left > 0);
        for (team, position, role) in replacements {
            let id = self.sign(team, position, role, true);
            chronicle.record_transaction(
                year,
                TransactionKind::CallUp,
                FRANCHISES[team].0,
                Some(id),
                &format!("Called up Player {id} to play {position}"),
            );
        }

        let teams = self.plan.teams;
        for idx in 0..self.players.len() {
            if self.players[idx].is_pitcher() || !self.rng.gen_bool(TRADE_CHANCE) {
                continue;
            }
            let from = self.players[idx].team;
            let to = (from + self.rng.gen_range(1..teams)) % teams;
            self.players[idx].team = to;
            let id = self.players[idx].id;
            chronicle.record_transaction(
                year,
                TransactionKind::Trade,
                FRANCHISES[to].0,
                Some(id),
                &format!("Acquired Player {id} from {}", FRANCHISES[from].0),
            );
        }
        retired
    }
}

fn winner(player: &Player, line: &SeasonStatLine) -> AwardWinner {
    AwardWinner {
        player_id: player.id,
        name: player.name.clone(),
        team: line.team.clone(),
        position: line.position.clone(),
    }
}

fn team_id(idx: usize) -> TeamId {
    TeamId::try_from(idx + 1).unwrap_or(TeamId::MAX)
}

fn rank_u8(rank: usize) -> u8 {
    u8::try_from(rank + 1).unwrap_or(u8::MAX)
}

/// Build and commit the full history for `seed`.
///
/// # Errors
///
/// Propagates a rejected season from [`LeagueGenerator::run`].
pub fn synthesize(
    plan: LeaguePlan,
    seed: u64,
    config: &AnalyticsConfig,
    verbose: bool,
) -> Result<LeagueRun> {
    LeagueGenerator::new(plan, seed, verbose).run(seed, config.clone())
}
