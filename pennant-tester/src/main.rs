mod logic;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::reports::{generate_console_report, generate_json_report, generate_markdown_report};
use logic::{LeaguePlan, LeagueRun, LogicTester, Scenario, TesterReport};
use pennant_history::{AnalyticsConfig, DynastyProfile};
use util::{resolve_seeds, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "pennant-tester", version = "0.1.0")]
#[command(about = "Seeded league synthesis and invariant checks for the Pennant history engine")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated, decimal or 0x-hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Teams in the synthesized league
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(2..=30))]
    teams: u8,

    /// Seasons to synthesize per seed
    #[arg(long, default_value_t = 25)]
    seasons: u16,

    /// Franchise abbreviation to profile in the report
    #[arg(long)]
    team: Option<String>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Analytics configuration JSON; omitted fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner(&args);

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let scenarios = expand_scenarios(&args.scenarios)?;
    let seeds = resolve_seeds(&split_csv(&args.seeds))?;
    let plan = LeaguePlan::new(usize::from(args.teams), args.seasons);

    let tester = LogicTester::new(plan, config, args.verbose);
    let (results, runs) = tester.run(&scenarios, &seeds);
    let profile = requested_profile(args.team.as_deref(), &runs)?;
    let report = TesterReport { results, profile };

    write_report(&args, &report, start_time)?;

    if report.results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for scenario in Scenario::ALL {
        writeln!(
            output_target.writer(),
            "  {:25} - {}",
            scenario.key(),
            scenario.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner(args: &Args) {
    // Keep machine-readable reports on stdout clean.
    if args.output.is_none() && args.report != ReportFormat::Console {
        return;
    }
    println!("{}", "⚾ Pennant History Tester".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let Some(path) = path else {
        return Ok(AnalyticsConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = AnalyticsConfig::from_json(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    Ok(config)
}

fn expand_scenarios(scenarios_arg: &str) -> Result<Vec<Scenario>> {
    let mut scenarios = Vec::new();
    for name in split_csv(scenarios_arg) {
        let requested = if name.eq_ignore_ascii_case("all") {
            Scenario::ALL.to_vec()
        } else if let Some(scenario) = Scenario::from_key(&name) {
            vec![scenario]
        } else {
            bail!("Unknown scenario: {name}");
        };
        for scenario in requested {
            if !scenarios.contains(&scenario) {
                scenarios.push(scenario);
            }
        }
    }
    if scenarios.is_empty() {
        scenarios.extend(Scenario::ALL);
    }
    Ok(scenarios)
}

/// Profile of `abbr` from the first league that knows it.
fn requested_profile(abbr: Option<&str>, runs: &[LeagueRun]) -> Result<Option<DynastyProfile>> {
    let Some(abbr) = abbr else {
        return Ok(None);
    };
    let Some((run, team_id)) = runs
        .iter()
        .find_map(|run| run.team_id(abbr).map(|team_id| (run, team_id)))
    else {
        eprintln!("⚠️  Unknown team: {}", abbr.yellow());
        return Ok(None);
    };
    let profile = run
        .chronicle
        .dynasty_profile(team_id)
        .with_context(|| format!("building profile for {abbr}"))?;
    Ok(Some(profile))
}

fn write_report(args: &Args, report: &TesterReport, start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => generate_json_report(&mut output_target, report)?,
        ReportFormat::Markdown => generate_markdown_report(&mut output_target, report)?,
        ReportFormat::Console => {
            if report.results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                generate_console_report(&mut output_target, report, start_time.elapsed())?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "pennant-main-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn parses_defaults() {
        let args = Args::try_parse_from(["pennant-tester"]).unwrap();
        assert_eq!(args.teams, 30);
        assert_eq!(args.seasons, 25);
        assert_eq!(args.report, ReportFormat::Console);
        assert_eq!(args.seeds, "1337");
    }

    #[test]
    fn rejects_out_of_range_team_counts() {
        assert!(Args::try_parse_from(["pennant-tester", "--teams", "1"]).is_err());
        assert!(Args::try_parse_from(["pennant-tester", "--teams", "31"]).is_err());
        assert!(Args::try_parse_from(["pennant-tester", "--teams", "2"]).is_ok());
    }

    #[test]
    fn expands_all_and_named_scenarios() {
        assert_eq!(expand_scenarios("all").unwrap(), Scenario::ALL.to_vec());
        assert_eq!(
            expand_scenarios("invariants, hall-of-fame").unwrap(),
            vec![Scenario::Invariants, Scenario::HallOfFame]
        );
        assert_eq!(expand_scenarios("all,invariants").unwrap().len(), 4);
        assert!(expand_scenarios("smoke").is_err());
    }

    #[test]
    fn loads_partial_config_files() {
        let path = temp_path("config");
        std::fs::write(&path, r#"{"hof": {"induction_vote": 80.0}}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert!((config.hof.induction_vote - 80.0).abs() < f64::EPSILON);
        assert_eq!(config.hof.min_seasons, 5);
        assert_eq!(config.peak.window, 5);
    }

    #[test]
    fn rejects_invalid_config() {
        let path = temp_path("bad-config");
        std::fs::write(&path, r#"{"eras": {"min_seasons": 1}}"#).unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn output_target_writes_file() {
        let path = temp_path("output");
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        writeln!(target, "hello").unwrap();
        target.flush_inner().unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }

    #[test]
    fn profile_lookup_tolerates_unknown_teams() {
        let plan = LeaguePlan::new(3, 6);
        let tester = LogicTester::new(plan, AnalyticsConfig::default(), false);
        let (_, runs) = tester.run(&[Scenario::Invariants], &[4]);
        assert!(requested_profile(Some("ZZZ"), &runs).unwrap().is_none());
        let profile = requested_profile(Some("bal"), &runs).unwrap().unwrap();
        assert_eq!(profile.abbr, "BAL");
        assert_eq!(profile.totals.seasons, 6);
    }
}
