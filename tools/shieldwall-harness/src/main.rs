//! Headless harness: runs a built-in scenario to completion and prints the
//! final tally as JSON.
//!
//! Usage: `shieldwall-harness [scenario] [config.json]`
//!
//! The config path may also come from `SHIELDWALL_CONFIG`. `SHIELDWALL_TICKS`
//! caps the run length; logging follows `RUST_LOG` and `LOG_FORMAT=json`.

use std::env;
use std::path::PathBuf;
use std::process;

use shieldwall_core::commands::SimCommand;
use shieldwall_core::enums::ScenarioId;
use shieldwall_core::state::SimSnapshot;
use shieldwall_sim::{SimConfig, SimulationEngine};
use tracing::{error, info, warn};

const DEFAULT_MAX_TICKS: u64 = 3_600;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn load_config(path: Option<PathBuf>) -> SimConfig {
    let config = match path {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => {
                info!(path = %path.display(), "config loaded");
                config
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load config");
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    config.with_env_overrides()
}

fn max_ticks() -> u64 {
    match env::var("SHIELDWALL_TICKS") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "ignoring invalid SHIELDWALL_TICKS");
            DEFAULT_MAX_TICKS
        }),
        Err(_) => DEFAULT_MAX_TICKS,
    }
}

fn main() {
    init_tracing();

    let mut args = env::args().skip(1);
    let scenario = match args.next() {
        Some(name) => match ScenarioId::from_name(&name) {
            Some(scenario) => scenario,
            None => {
                let known: Vec<&str> = ScenarioId::ALL.iter().map(|s| s.name()).collect();
                error!(scenario = %name, ?known, "unknown scenario");
                process::exit(2);
            }
        },
        None => ScenarioId::default(),
    };
    let config_path = args
        .next()
        .or_else(|| env::var("SHIELDWALL_CONFIG").ok())
        .map(PathBuf::from);

    let config = load_config(config_path);
    let limit = max_ticks();
    info!(
        scenario = scenario.name(),
        seed = config.seed,
        interception = config.interception_enabled,
        limit,
        "starting run"
    );

    let mut engine = SimulationEngine::new(config);
    engine.queue_command(SimCommand::LoadScenario { scenario });

    let mut last = SimSnapshot::default();
    for _ in 0..limit {
        last = engine.tick();
        if engine.is_settled() {
            break;
        }
    }
    if !engine.is_settled() {
        warn!(
            in_flight = last.projectiles.len(),
            "tick limit reached before the scenario settled"
        );
    }

    let tally = engine.tally();
    info!(
        ticks = last.time.tick,
        launched = tally.launched,
        absorbed = tally.absorbed,
        landed = tally.landed,
        "run finished"
    );

    let summary = serde_json::json!({
        "scenario": scenario.name(),
        "ticks": last.time.tick,
        "settled": engine.is_settled(),
        "interception_enabled": last.interception_enabled,
        "tally": tally,
        "shields": last.shields,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!(error = %e, "failed to serialize summary");
            process::exit(1);
        }
    }
}
