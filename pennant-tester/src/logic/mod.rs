pub mod league;
pub mod reports;
pub mod scenarios;
pub mod tester;

pub use league::{LeaguePlan, LeagueRun};
pub use reports::TesterReport;
pub use scenarios::Scenario;
pub use tester::{LogicTester, ScenarioResult};
