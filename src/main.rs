use macroquad::prelude::*;

mod config;
mod genome;
mod headless;
mod renderer;
mod simulation;
mod stats;
mod ui;
mod vecmath;
mod vehicle;

use config::SimConfig;
use headless::Scenario;
use simulation::SimState;
use stats::SimStats;
use ui::UiState;

const FIXED_DT: f64 = 1.0 / 60.0;

struct CliOptions {
    seed: u64,
    config_path: Option<String>,
    headless: bool,
    scenario: Scenario,
    ticks: u64,
    report_path: Option<String>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            config_path: None,
            headless: false,
            scenario: Scenario::Baseline,
            ticks: 1000,
            report_path: None,
        }
    }
}

impl CliOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut opts = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => opts.headless = true,
                "--seed" => {
                    let value = args.next().ok_or("--seed needs a value")?;
                    opts.seed = value
                        .parse()
                        .map_err(|_| format!("invalid seed: {value}"))?;
                }
                "--ticks" => {
                    let value = args.next().ok_or("--ticks needs a value")?;
                    opts.ticks = value
                        .parse()
                        .map_err(|_| format!("invalid tick count: {value}"))?;
                }
                "--scenario" => {
                    let value = args.next().ok_or("--scenario needs a value")?;
                    opts.scenario = Scenario::parse_cli(&value)
                        .ok_or_else(|| format!("unknown scenario: {value}"))?;
                }
                "--config" => {
                    opts.config_path = Some(args.next().ok_or("--config needs a path")?);
                }
                "--report" => {
                    opts.report_path = Some(args.next().ok_or("--report needs a path")?);
                }
                other => return Err(format!("unknown argument: {other}")),
            }
        }

        Ok(opts)
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "VIVARIUM — Evolutionary Steering Vehicles".to_string(),
        window_width: 1000,
        window_height: 600,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let opts = match CliOptions::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("[VIVARIUM] {e}");
            return;
        }
    };

    let cfg = match &opts.config_path {
        Some(path) => match SimConfig::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("[VIVARIUM] {e}");
                return;
            }
        },
        None => SimConfig::default(),
    };

    if opts.headless {
        let report = headless::run(cfg, opts.scenario, opts.seed, opts.ticks);
        eprintln!(
            "[VIVARIUM] headless {}: {} ({} ticks, population {}, births {}, deaths {})",
            report.scenario,
            report.overall_status,
            report.ticks,
            report.final_population,
            report.total_births,
            report.total_deaths,
        );
        if let Some(path) = &opts.report_path {
            match headless::write_report(&report, path) {
                Ok(()) => eprintln!("[VIVARIUM] report written to {path}"),
                Err(e) => eprintln!("[VIVARIUM] {e}"),
            }
        }
        return;
    }

    let mut sim = SimState::new(cfg, opts.seed);
    let mut sim_stats = SimStats::new(1000);
    let mut ui_state = UiState::default();
    let mut accumulator = 0.0f64;

    loop {
        if is_key_pressed(KeyCode::Space) {
            sim.paused = !sim.paused;
        }
        if is_key_pressed(KeyCode::D) {
            sim.show_debug = !sim.show_debug;
        }
        if is_key_pressed(KeyCode::Period) {
            ui_state.step_requested = true;
        }

        let effective_dt = FIXED_DT / sim.speed_multiplier as f64;
        if !sim.paused {
            accumulator += (get_frame_time() as f64).min(0.1);
            while accumulator >= effective_dt {
                step(&mut sim, &mut sim_stats);
                accumulator -= effective_dt;
            }
        } else {
            accumulator = 0.0;
            if ui_state.step_requested {
                step(&mut sim, &mut sim_stats);
            }
        }
        ui_state.step_requested = false;

        renderer::draw(&sim);
        ui::draw_ui(&mut sim, &mut ui_state, &sim_stats);

        next_frame().await;
    }
}

fn step(sim: &mut SimState, stats: &mut SimStats) {
    sim.tick();
    stats.record(
        sim.vehicles.len(),
        sim.avg_health(),
        sim.food.len(),
        sim.poison.len(),
        sim.births_this_tick,
        sim.deaths_this_tick,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, String> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn cli_defaults_are_interactive_seed_42() {
        let opts = parse(&[]).unwrap();
        assert!(!opts.headless);
        assert_eq!(opts.seed, 42);
        assert_eq!(opts.scenario, Scenario::Baseline);
    }

    #[test]
    fn cli_parses_headless_run() {
        let opts = parse(&[
            "--headless",
            "--seed",
            "7",
            "--ticks",
            "500",
            "--scenario",
            "famine",
            "--report",
            "out.json",
        ])
        .unwrap();

        assert!(opts.headless);
        assert_eq!(opts.seed, 7);
        assert_eq!(opts.ticks, 500);
        assert_eq!(opts.scenario, Scenario::Famine);
        assert_eq!(opts.report_path.as_deref(), Some("out.json"));
    }

    #[test]
    fn cli_rejects_unknown_arguments_and_bad_values() {
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--seed"]).is_err());
        assert!(parse(&["--seed", "abc"]).is_err());
        assert!(parse(&["--scenario", "mystery"]).is_err());
    }
}
