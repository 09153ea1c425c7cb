use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use pennant_history::DynastyProfile;

use super::ScenarioResult;

/// Everything a report renders: scenario outcomes plus the optional
/// franchise profile requested with `--team`.
#[derive(Debug, Clone, Serialize)]
pub struct TesterReport {
    pub results: Vec<ScenarioResult>,
    pub profile: Option<DynastyProfile>,
}

impl TesterReport {
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.passed() as f64 / self.results.len() as f64;
        rate * 100.0
    }
}

pub fn generate_console_report<W: Write>(
    out: &mut W,
    report: &TesterReport,
    total_duration: Duration,
) -> Result<()> {
    let total = report.results.len();
    let passed = report.passed();
    writeln!(out)?;
    writeln!(out, "{}", "📊 History Engine Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=================================".cyan())?;
    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", report.success_rate())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in &report.results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{} {} (seed {}) - {:?}",
            status,
            result.scenario_name.bold(),
            result.seed,
            result.duration
        )?;
        for failure in &result.failures {
            writeln!(out, "     • {}", failure.red())?;
        }
    }

    if let Some(profile) = &report.profile {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!("🏟  {} ({})", profile.name, profile.abbr)
                .bright_yellow()
                .bold()
        )?;
        let totals = &profile.totals;
        let peak = &profile.peak_power;
        writeln!(out, "Dynasty index: {}", profile.dynasty_index)?;
        writeln!(
            out,
            "Record: {}-{} over {} seasons, {} titles",
            totals.wins, totals.losses, totals.seasons, totals.titles
        )?;
        if !peak.is_empty() {
            writeln!(out, "Peak: {}-{} ({})", peak.start_year, peak.end_year, peak.score)?;
        }
        for era in &profile.era_cards {
            writeln!(
                out,
                "Era: {}-{}, {} qualifying seasons, {} titles",
                era.start_year, era.end_year, era.seasons, era.titles
            )?;
        }
    }
    Ok(())
}

pub fn generate_json_report<W: Write>(out: &mut W, report: &TesterReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(out: &mut W, report: &TesterReport) -> Result<()> {
    let total = report.results.len();
    let passed = report.passed();
    writeln!(out, "# Pennant History Test Results\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", report.success_rate())?;

    writeln!(out, "## Detailed Results\n")?;
    writeln!(out, "| Scenario | Seed | Status | Time |")?;
    writeln!(out, "|---|---|---|---|")?;
    for result in &report.results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {} | {:?} |",
            result.scenario_name, result.seed, status, result.duration
        )?;
    }
    let failing: Vec<&ScenarioResult> = report.results.iter().filter(|r| !r.passed).collect();
    if !failing.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for result in failing {
            for failure in &result.failures {
                writeln!(out, "- `{}` seed {}: {failure}", result.scenario_name, result.seed)?;
            }
        }
    }

    if let Some(profile) = &report.profile {
        writeln!(out, "\n## {} ({})\n", profile.name, profile.abbr)?;
        writeln!(out, "- **Dynasty index**: {}", profile.dynasty_index)?;
        writeln!(
            out,
            "- **Record**: {}-{} ({} titles)",
            profile.totals.wins, profile.totals.losses, profile.totals.titles
        )?;
        writeln!(out, "- **Eras**: {}", profile.era_cards.len())?;
        writeln!(out, "- **Hall of Seasons entries**: {}", profile.hall_of_seasons.len())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TesterReport {
        TesterReport {
            results: vec![
                ScenarioResult {
                    scenario_name: "invariants".to_string(),
                    seed: 7,
                    passed: true,
                    failures: Vec::new(),
                    duration: Duration::from_millis(12),
                },
                ScenarioResult {
                    scenario_name: "hall-of-fame".to_string(),
                    seed: 7,
                    passed: false,
                    failures: vec!["player 4 inducted twice".to_string()],
                    duration: Duration::from_millis(3),
                },
            ],
            profile: None,
        }
    }

    #[test]
    fn success_rate_handles_empty_runs() {
        let empty = TesterReport {
            results: Vec::new(),
            profile: None,
        };
        assert!(empty.success_rate().abs() < f64::EPSILON);
        assert!((sample().success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn markdown_lists_failures() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("- **Failed**: 1"));
        assert!(text.contains("`hall-of-fame` seed 7: player 4 inducted twice"));
    }

    #[test]
    fn json_is_parseable() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["results"].as_array().map(Vec::len), Some(2));
        assert!(value["profile"].is_null());
    }

    #[test]
    fn console_mentions_every_scenario() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &sample(), Duration::from_secs(1)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("invariants"));
        assert!(text.contains("player 4 inducted twice"));
    }
}
