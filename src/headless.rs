//! Headless scenario runner: advance the simulation without a window,
//! validate invariants, and emit a JSON report.

use serde::Serialize;

use crate::config::SimConfig;
use crate::simulation::SimState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Scenario {
    /// Default parameters.
    Baseline,
    /// No target replenishment: the population must eventually starve out.
    Famine,
}

impl Scenario {
    pub fn parse_cli(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "baseline" => Some(Self::Baseline),
            "famine" | "starvation" => Some(Self::Famine),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Famine => "famine",
        }
    }

    fn apply(self, mut cfg: SimConfig) -> SimConfig {
        match self {
            Self::Baseline => {}
            Self::Famine => {
                cfg.initial_food = 0;
                cfg.initial_poison = 0;
                cfg.replenish_probability = 0.0;
            }
        }
        cfg
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: String,
    pub passed: bool,
    pub details: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub scenario: String,
    pub seed: u64,
    pub ticks: u64,
    pub final_population: usize,
    pub final_food: usize,
    pub final_poison: usize,
    pub total_births: u64,
    pub total_deaths: u64,
    pub extinction_tick: Option<u64>,
    pub overall_status: String,
    pub checks: Vec<Check>,
}

struct RunOutcome {
    sim: SimState,
    total_births: u64,
    total_deaths: u64,
    extinction_tick: Option<u64>,
}

fn run_sim(cfg: SimConfig, seed: u64, ticks: u64) -> RunOutcome {
    let mut sim = SimState::new(cfg, seed);
    let mut total_births = 0u64;
    let mut total_deaths = 0u64;
    let mut extinction_tick = None;

    for tick in 0..ticks {
        sim.tick();
        total_births += u64::from(sim.births_this_tick);
        total_deaths += u64::from(sim.deaths_this_tick);
        if extinction_tick.is_none() && sim.vehicles.is_empty() {
            extinction_tick = Some(tick);
        }
    }

    RunOutcome {
        sim,
        total_births,
        total_deaths,
        extinction_tick,
    }
}

/// Run `ticks` steps of the scenario and collect invariant checks.
pub fn run(base_cfg: SimConfig, scenario: Scenario, seed: u64, ticks: u64) -> Report {
    let cfg = scenario.apply(base_cfg);
    let initial_population = cfg.initial_population;

    let outcome = run_sim(cfg.clone(), seed, ticks);
    let rerun = run_sim(cfg, seed, ticks);

    let mut checks = Vec::new();

    let expected = initial_population as i64 + outcome.total_births as i64
        - outcome.total_deaths as i64;
    checks.push(Check {
        name: "population_accounting".into(),
        passed: expected == outcome.sim.vehicles.len() as i64,
        details: format!(
            "initial {} + births {} - deaths {} vs final {}",
            initial_population,
            outcome.total_births,
            outcome.total_deaths,
            outcome.sim.vehicles.len()
        ),
    });

    let all_finite = outcome.sim.vehicles.iter().all(|v| {
        v.pos.is_finite() && v.vel.is_finite() && v.health.is_finite()
    });
    checks.push(Check {
        name: "state_finite".into(),
        passed: all_finite,
        details: format!("{} vehicles scanned", outcome.sim.vehicles.len()),
    });

    let deterministic = outcome.sim.vehicles.len() == rerun.sim.vehicles.len()
        && outcome.sim.food == rerun.sim.food
        && outcome.sim.poison == rerun.sim.poison
        && outcome
            .sim
            .vehicles
            .iter()
            .zip(rerun.sim.vehicles.iter())
            .all(|(a, b)| a.pos == b.pos && a.health == b.health);
    checks.push(Check {
        name: "seed_determinism".into(),
        passed: deterministic,
        details: "identical state after re-running the same seed".into(),
    });

    if scenario == Scenario::Famine && ticks >= 500 {
        checks.push(Check {
            name: "famine_extinction".into(),
            passed: outcome.extinction_tick.is_some(),
            details: format!("extinction_tick = {:?}", outcome.extinction_tick),
        });
    }

    let overall = if checks.iter().all(|c| c.passed) {
        "pass"
    } else {
        "fail"
    };

    Report {
        scenario: scenario.label().to_string(),
        seed,
        ticks,
        final_population: outcome.sim.vehicles.len(),
        final_food: outcome.sim.food.len(),
        final_poison: outcome.sim.poison.len(),
        total_births: outcome.total_births,
        total_deaths: outcome.total_deaths,
        extinction_tick: outcome.extinction_tick,
        overall_status: overall.to_string(),
        checks,
    }
}

pub fn write_report(report: &Report, path: &str) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("failed to serialize report: {e}"))?;
    std::fs::write(path, json).map_err(|e| format!("failed to write {path}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_run_passes_all_checks() {
        let report = run(SimConfig::default(), Scenario::Baseline, 42, 300);
        assert_eq!(report.overall_status, "pass");
        assert_eq!(report.ticks, 300);
        for check in &report.checks {
            assert!(check.passed, "{} failed: {}", check.name, check.details);
        }
    }

    #[test]
    fn famine_scenario_starves_the_population() {
        let report = run(SimConfig::default(), Scenario::Famine, 7, 600);
        assert_eq!(report.overall_status, "pass");
        // Metabolic decay alone kills in ~400 ticks; corpses feed nobody fast
        // enough to matter without replenishment.
        assert!(report.extinction_tick.is_some());
    }

    #[test]
    fn scenario_names_parse() {
        assert_eq!(Scenario::parse_cli("baseline"), Some(Scenario::Baseline));
        assert_eq!(Scenario::parse_cli("FAMINE"), Some(Scenario::Famine));
        assert_eq!(Scenario::parse_cli("starvation"), Some(Scenario::Famine));
        assert_eq!(Scenario::parse_cli("nope"), None);
    }
}
