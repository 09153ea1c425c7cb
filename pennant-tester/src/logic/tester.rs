use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use pennant_history::AnalyticsConfig;

use super::league::{LeaguePlan, LeagueRun};
use super::scenarios::{Scenario, prepare};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScenarioResult {
    fn from_check(
        scenario: Scenario,
        seed: u64,
        outcome: anyhow::Result<Vec<String>>,
        duration: Duration,
    ) -> Self {
        let failures = match outcome {
            Ok(failures) => failures,
            Err(err) => vec![format!("{err:#}")],
        };
        Self {
            scenario_name: scenario.key().to_string(),
            seed,
            passed: failures.is_empty(),
            failures,
            duration,
        }
    }
}

pub struct LogicTester {
    plan: LeaguePlan,
    config: AnalyticsConfig,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(plan: LeaguePlan, config: AnalyticsConfig, verbose: bool) -> Self {
        Self {
            plan,
            config,
            verbose,
        }
    }

    /// Synthesize one league per seed and run every scenario on it. A
    /// league that fails to build fails every scenario for that seed.
    pub fn run(
        &self,
        scenarios: &[Scenario],
        seeds: &[u64],
    ) -> (Vec<ScenarioResult>, Vec<LeagueRun>) {
        let mut results = Vec::new();
        let mut runs = Vec::new();
        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Building league: {} teams, {} seasons (seed {})",
                    self.plan.teams,
                    self.plan.seasons,
                    seed.to_string().bright_white()
                );
            }
            let start = Instant::now();
            let run = match prepare(self.plan, seed, &self.config, self.verbose) {
                Ok(run) => run,
                Err(err) => {
                    let message = format!("{err:#}");
                    log::error!("seed {seed}: {message}");
                    results.extend(scenarios.iter().map(|&scenario| {
                        ScenarioResult::from_check(
                            scenario,
                            seed,
                            Err(anyhow::anyhow!(message.clone())),
                            start.elapsed(),
                        )
                    }));
                    continue;
                }
            };
            for &scenario in scenarios {
                let start = Instant::now();
                let outcome = scenario.check(&run, &self.config);
                let result = ScenarioResult::from_check(scenario, seed, outcome, start.elapsed());
                if self.verbose {
                    let status = if result.passed {
                        "pass".green()
                    } else {
                        "fail".red()
                    };
                    println!("   {} {} ({:?})", status, scenario.key(), result.duration);
                }
                results.push(result);
            }
            runs.push(run);
        }
        (results, runs)
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}
